use gamedata::charts::CategorySummary;
use gamedata::data::{SalesRecord, Scope};
use gamedata::stats::SummaryCalculator;
use gamedata::view::{ChartState, ContextError, DrillDownContext, ViewLevel};

fn record(year: i32, publisher: &str, genre: &str, platform: &str, sales: f64) -> SalesRecord {
    SalesRecord {
        year,
        total_sales: sales,
        publisher: publisher.to_string(),
        name: format!("{publisher} {year}"),
        genre: genre.to_string(),
        platform: platform.to_string(),
        na_sales: 0.0,
        jp_sales: 0.0,
        pal_sales: 0.0,
        other_sales: 0.0,
    }
}

#[test]
fn scenario_year_view_uses_all_records() {
    let records = vec![
        record(2005, "Square", "RPG", "PC", 1.5),
        record(2005, "Square", "RPG", "PC", 2.5),
    ];
    let scope = DrillDownContext::root().scope().unwrap();
    let data = SummaryCalculator::compute(&records, &scope);

    assert_eq!(data.genre, vec![CategorySummary::new("RPG", 2.0)]);
    assert_eq!(data.platform, vec![CategorySummary::new("PC", 4.0)]);
}

#[test]
fn scenario_publisher_view_filters_by_year() {
    let records = vec![
        record(2005, "Square", "RPG", "PS2", 1.5),
        record(2006, "Square", "Action", "PS3", 2.5),
    ];
    let scope = DrillDownContext::for_year(2005).scope().unwrap();
    let data = SummaryCalculator::compute(&records, &scope);

    assert_eq!(data.genre, vec![CategorySummary::new("RPG", 1.0)]);
    assert_eq!(data.platform, vec![CategorySummary::new("PS2", 1.5)]);
}

#[test]
fn game_view_filters_by_year_and_publisher() {
    let records = vec![
        record(2005, "Square", "RPG", "PS2", 1.5),
        record(2005, "Capcom", "Action", "PS2", 2.5),
        record(2006, "Square", "RPG", "PS3", 4.0),
    ];
    let scope = DrillDownContext::for_publisher(2005, "Square").scope().unwrap();
    assert_eq!(
        scope,
        Scope::Publisher {
            year: 2005,
            publisher: "Square".to_string()
        }
    );
    let data = SummaryCalculator::compute(&records, &scope);
    assert_eq!(data.platform, vec![CategorySummary::new("PS2", 1.5)]);
}

#[test]
fn scenario_empty_dataset() {
    let mut state = ChartState::new();
    let data = state.replace_records(Vec::new()).unwrap();
    assert!(data.genre.is_empty());
    assert!(data.platform.is_empty());
}

#[test]
fn recompute_is_idempotent() {
    let mut state = ChartState::new();
    state
        .replace_records(vec![
            record(2001, "A", "Racing", "GC", 0.333),
            record(2001, "B", "Sports", "PS2", 0.333),
            record(2001, "C", "Racing", "PS2", 0.5),
        ])
        .unwrap();

    let first = state.recompute().unwrap().clone();
    let second = state.recompute().unwrap().clone();
    assert_eq!(first, second);
    assert_eq!(first.platform[0], CategorySummary::new("PS2", 0.83));
}

#[test]
fn missing_year_is_rejected_not_unfiltered() {
    let mut state = ChartState::new();
    state
        .replace_records(vec![record(2001, "A", "Racing", "GC", 1.0)])
        .unwrap();
    state.set_current_view(ViewLevel::Publisher);

    assert_eq!(
        state.recompute().unwrap_err(),
        ContextError::MissingYear {
            view: ViewLevel::Publisher
        }
    );
}
