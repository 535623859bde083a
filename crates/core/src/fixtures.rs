//! Deterministic demo dataset: a small marketplace catalog plus one shopper
//! snapshot with every signal populated.
//!
//! Timestamps are pinned so `demo` output and tests are reproducible; rank
//! against [`DemoDataset::now`] rather than the wall clock.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::domain::behavior::{PriceRange, UserBehavior, UserId};
use crate::domain::product::{Product, ProductId, Rating, Vendor, VendorId};

struct ProductSeed {
    id: &'static str,
    name: &'static str,
    price_naira: i64,
    category: &'static str,
    subcategory: Option<&'static str>,
    tags: &'static [&'static str],
    vendor_id: &'static str,
    vendor_name: &'static str,
    verified: bool,
    rating_average: f64,
    rating_count: u32,
    views: u64,
    likes: u64,
    sales: u64,
    created_day: u32,
    on_sale: bool,
    discount_pct: Option<i64>,
}

const PRODUCT_SEEDS: &[ProductSeed] = &[
    ProductSeed {
        id: "prod-infinix-note",
        name: "Infinix Note 40 Smartphone",
        price_naira: 285_000,
        category: "Electronics",
        subcategory: Some("Phones"),
        tags: &["infinix", "smartphone", "android"],
        vendor_id: "vendor-gadget-hub",
        vendor_name: "Ikeja Gadget Hub",
        verified: true,
        rating_average: 4.6,
        rating_count: 182,
        views: 5_400,
        likes: 410,
        sales: 96,
        created_day: 2,
        on_sale: true,
        discount_pct: Some(10),
    },
    ProductSeed {
        id: "prod-oraimo-buds",
        name: "Oraimo FreePods Earbuds",
        price_naira: 24_500,
        category: "Electronics",
        subcategory: Some("Audio"),
        tags: &["oraimo", "earbuds", "bluetooth"],
        vendor_id: "vendor-gadget-hub",
        vendor_name: "Ikeja Gadget Hub",
        verified: true,
        rating_average: 4.3,
        rating_count: 95,
        views: 3_100,
        likes: 260,
        sales: 151,
        created_day: 20,
        on_sale: false,
        discount_pct: None,
    },
    ProductSeed {
        id: "prod-solar-lantern",
        name: "Rechargeable Solar Lantern",
        price_naira: 18_000,
        category: "Electronics",
        subcategory: Some("Power"),
        tags: &["solar", "lantern", "rechargeable"],
        vendor_id: "vendor-bright-power",
        vendor_name: "Bright Power Supplies",
        verified: false,
        rating_average: 4.0,
        rating_count: 44,
        views: 980,
        likes: 75,
        sales: 38,
        created_day: 11,
        on_sale: false,
        discount_pct: None,
    },
    ProductSeed {
        id: "prod-ankara-gown",
        name: "Ankara Flare Gown",
        price_naira: 32_000,
        category: "Fashion",
        subcategory: Some("Women"),
        tags: &["ankara", "gown", "handmade"],
        vendor_id: "vendor-yaba-styles",
        vendor_name: "Yaba Styles",
        verified: true,
        rating_average: 4.8,
        rating_count: 67,
        views: 2_250,
        likes: 340,
        sales: 58,
        created_day: 6,
        on_sale: true,
        discount_pct: Some(15),
    },
    ProductSeed {
        id: "prod-ankara-tote",
        name: "Ankara Tote Bag",
        price_naira: 9_500,
        category: "Fashion",
        subcategory: Some("Bags"),
        tags: &["ankara", "tote", "handmade"],
        vendor_id: "vendor-yaba-styles",
        vendor_name: "Yaba Styles",
        verified: true,
        rating_average: 4.5,
        rating_count: 31,
        views: 860,
        likes: 120,
        sales: 42,
        created_day: 18,
        on_sale: false,
        discount_pct: None,
    },
    ProductSeed {
        id: "prod-agbada-set",
        name: "Embroidered Agbada Set",
        price_naira: 78_000,
        category: "Fashion",
        subcategory: Some("Men"),
        tags: &["agbada", "embroidery", "occasion"],
        vendor_id: "vendor-kano-threads",
        vendor_name: "Kano Threads",
        verified: false,
        rating_average: 4.2,
        rating_count: 23,
        views: 640,
        likes: 58,
        sales: 12,
        created_day: 9,
        on_sale: false,
        discount_pct: None,
    },
    ProductSeed {
        id: "prod-shea-butter",
        name: "Raw Shea Butter 500g",
        price_naira: 6_500,
        category: "Beauty",
        subcategory: Some("Skincare"),
        tags: &["shea", "organic", "skincare"],
        vendor_id: "vendor-naija-naturals",
        vendor_name: "Naija Naturals",
        verified: true,
        rating_average: 4.7,
        rating_count: 210,
        views: 4_800,
        likes: 520,
        sales: 263,
        created_day: 1,
        on_sale: false,
        discount_pct: None,
    },
    ProductSeed {
        id: "prod-gas-cooker",
        name: "Table-Top Gas Cooker",
        price_naira: 42_000,
        category: "Home",
        subcategory: Some("Kitchen"),
        tags: &["cooker", "kitchen", "gas"],
        vendor_id: "vendor-bright-power",
        vendor_name: "Bright Power Supplies",
        verified: false,
        rating_average: 3.9,
        rating_count: 58,
        views: 1_420,
        likes: 96,
        sales: 31,
        created_day: 14,
        on_sale: true,
        discount_pct: Some(5),
    },
    ProductSeed {
        id: "prod-woven-basket",
        name: "Handwoven Storage Basket",
        price_naira: 12_000,
        category: "Home",
        subcategory: Some("Decor"),
        tags: &["handmade", "woven", "decor"],
        vendor_id: "vendor-naija-naturals",
        vendor_name: "Naija Naturals",
        verified: true,
        rating_average: 4.4,
        rating_count: 19,
        views: 510,
        likes: 64,
        sales: 17,
        created_day: 23,
        on_sale: false,
        discount_pct: None,
    },
    ProductSeed {
        id: "prod-power-bank",
        name: "20000mAh Power Bank",
        price_naira: 21_000,
        category: "Electronics",
        subcategory: Some("Power"),
        tags: &["oraimo", "powerbank", "fast-charge"],
        vendor_id: "vendor-gadget-hub",
        vendor_name: "Ikeja Gadget Hub",
        verified: true,
        rating_average: 4.1,
        rating_count: 133,
        views: 2_700,
        likes: 180,
        sales: 104,
        created_day: 25,
        on_sale: false,
        discount_pct: None,
    },
];

/// Demo marketplace dataset with one fully-populated shopper snapshot.
pub struct DemoDataset;

impl DemoDataset {
    /// Reference clock for reproducible trending scores.
    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    /// Fixed demo shopper id.
    pub fn user() -> UserId {
        UserId(Uuid::from_u128(0x4d61_6b65_4974_5365_6c6c_4465_6d6f_0001))
    }

    pub fn catalog() -> Catalog {
        let products = PRODUCT_SEEDS
            .iter()
            .map(|seed| Product {
                id: ProductId::new(seed.id),
                name: seed.name.to_owned(),
                price: Decimal::from(seed.price_naira),
                category: seed.category.to_owned(),
                subcategory: seed.subcategory.map(str::to_owned),
                tags: seed.tags.iter().map(|tag| (*tag).to_owned()).collect(),
                vendor: Vendor {
                    id: VendorId(seed.vendor_id.to_owned()),
                    name: seed.vendor_name.to_owned(),
                    verified: seed.verified,
                },
                rating: Rating { average: seed.rating_average, count: seed.rating_count },
                views: seed.views,
                likes: seed.likes,
                sales: seed.sales,
                created_at: Utc.with_ymd_and_hms(2025, 5, seed.created_day, 9, 0, 0).unwrap(),
                on_sale: seed.on_sale,
                discount: seed.discount_pct.map(Decimal::from),
            })
            .collect();

        Catalog::new(products).expect("demo seed ids are unique")
    }

    /// A shopper who browses electronics and ankara fashion on a mid-range
    /// budget; has already seen the earbuds and the tote bag.
    pub fn behavior() -> UserBehavior {
        UserBehavior {
            viewed_products: BTreeSet::from([
                ProductId::new("prod-oraimo-buds"),
                ProductId::new("prod-ankara-tote"),
            ]),
            viewed_categories: BTreeMap::from([
                ("Electronics".to_owned(), 7),
                ("Fashion".to_owned(), 3),
            ]),
            search_queries: vec!["power bank".to_owned(), "ankara".to_owned()],
            liked_products: BTreeSet::from([ProductId::new("prod-ankara-gown")]),
            purchase_history: BTreeSet::from([ProductId::new("prod-shea-butter")]),
            time_spent_on_categories: BTreeMap::from([
                ("Electronics".to_owned(), 1_860),
                ("Fashion".to_owned(), 540),
            ]),
            price_range: PriceRange::new(Decimal::from(5_000), Decimal::from(100_000)),
            preferred_brands: vec!["oraimo".to_owned(), "infinix".to_owned()],
        }
    }
}
