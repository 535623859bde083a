use makeitsell_core::{DemoDataset, RecommendationEngine, Strategy, DEFAULT_LIMIT};

use crate::commands::{render_ranking, CommandResult};

/// Rank the built-in demo marketplace against the demo shopper.
///
/// Both the dataset and the reference clock are pinned, so repeated runs
/// produce byte-identical output.
pub fn run(strategy: &str, limit: Option<usize>) -> CommandResult {
    let strategy: Strategy = match strategy.parse() {
        Ok(strategy) => strategy,
        Err(error) => {
            return CommandResult::failure("demo", "invalid_input", error.to_string(), 5);
        }
    };
    let limit = limit.unwrap_or(DEFAULT_LIMIT);

    let engine = RecommendationEngine::new();
    let catalog = DemoDataset::catalog();
    let behavior = DemoDataset::behavior();

    let ranked =
        match engine.recommend_at(&catalog, &behavior, strategy, limit, DemoDataset::now()) {
            Ok(ranked) => ranked,
            Err(error) => {
                return CommandResult::failure("demo", "invalid_input", error.to_string(), 5);
            }
        };

    if ranked.is_empty() {
        return CommandResult::success(
            "demo",
            format!("no recommendations for strategy `{strategy}` in the demo dataset"),
        );
    }

    let mut message = format!(
        "demo shopper, top {} of {} candidates with strategy `{}`:\n",
        ranked.len(),
        catalog.len(),
        strategy
    );
    message.push_str(&render_ranking(&ranked).join("\n"));
    CommandResult::success("demo", message)
}
