use crate::*;
use crate::validate::collect_issues;

fn sample() -> Puzzle {
    Puzzle::new(
        Some("Test".into()),
        MistakeBudget::Limited(4),
        vec![
            Category::new("FRUIT", ["APPLE", "PEAR", "KIWI", "PLUM"]),
            Category::new("COLORS", ["RED", "BLUE", "GREEN", "GOLD"]),
        ],
    )
}

// ========== Mistake budget ==========

#[test]
fn test_budget_from_i64() {
    assert_eq!(MistakeBudget::from_i64(4), Some(MistakeBudget::Limited(4)));
    assert_eq!(MistakeBudget::from_i64(0), Some(MistakeBudget::Limited(0)));
    assert_eq!(MistakeBudget::from_i64(-1), Some(MistakeBudget::Unlimited));
    assert_eq!(MistakeBudget::from_i64(-2), None);
}

#[test]
fn test_budget_json_forms() {
    let n: MistakeBudget = serde_json::from_str("3").unwrap();
    assert_eq!(n, MistakeBudget::Limited(3));
    let u: MistakeBudget = serde_json::from_str("-1").unwrap();
    assert_eq!(u, MistakeBudget::Unlimited);
    let s: MistakeBudget = serde_json::from_str("\"unlimited\"").unwrap();
    assert_eq!(s, MistakeBudget::Unlimited);
    assert!(serde_json::from_str::<MistakeBudget>("-5").is_err());
    assert_eq!(serde_json::to_string(&MistakeBudget::Unlimited).unwrap(), "-1");
}

// ========== Puzzle model ==========

#[test]
fn test_puzzle_json_aliases() {
    let json = r#"{"title":"Old","categories":[{"name":"A","color":"yellow","words":["X","Y"]}],"mistakes":2}"#;
    let p: Puzzle = serde_json::from_str(json).unwrap();
    assert_eq!(p.name.as_deref(), Some("Old"));
    assert_eq!(p.max_mistakes, MistakeBudget::Limited(2));
    assert_eq!(p.categories[0].items, vec!["X", "Y"]);
}

#[test]
fn test_puzzle_json_defaults() {
    let p: Puzzle = serde_json::from_str(r#"{"name":"  ","categories":[]}"#).unwrap();
    assert!(p.name.is_none());
    assert_eq!(p.max_mistakes, MistakeBudget::Limited(4));
}

#[test]
fn test_puzzle_serializes_camel_case() {
    let v = serde_json::to_value(sample()).unwrap();
    assert_eq!(v["maxMistakes"], 4);
    assert_eq!(v["categories"][1]["items"][0], "RED");
}

#[test]
fn test_display_name() {
    let mut p = sample();
    assert_eq!(p.display_name("Custom Puzzle"), "Test");
    p.name = None;
    assert_eq!(p.display_name("Custom Puzzle"), "Custom Puzzle");
}

#[test]
fn test_playable() {
    let palette = Palette::default();
    assert!(sample().is_playable(&palette));

    let mut uneven = sample();
    uneven.categories[1].items.pop();
    assert!(!uneven.is_playable(&palette));

    let empty = Puzzle::new(None, MistakeBudget::default(), vec![]);
    assert!(!empty.is_playable(&palette));

    let narrow = Palette::new(vec![CategoryColor::Yellow]);
    assert!(!sample().is_playable(&narrow));
}

#[test]
fn test_normalized() {
    let p = Puzzle::new(
        Some("  Mine ".into()),
        MistakeBudget::Unlimited,
        vec![Category::new(" Fish ", [" bass", "Trout "])],
    );
    let n = p.normalized();
    assert_eq!(n.name.as_deref(), Some("Mine"));
    assert_eq!(n.categories[0].name, "Fish");
    assert_eq!(n.categories[0].items, vec!["BASS", "TROUT"]);
}

#[test]
fn test_category_of() {
    let p = sample();
    assert_eq!(p.category_of(" kiwi"), Some(0));
    assert_eq!(p.category_of("GOLD"), Some(1));
    assert_eq!(p.category_of("SILVER"), None);
}

// ========== Palette ==========

#[test]
fn test_palette_order() {
    let palette = Palette::default();
    assert_eq!(palette.len(), 6);
    assert_eq!(palette.color_for(0), Some(CategoryColor::Yellow));
    assert_eq!(palette.color_for(3), Some(CategoryColor::Purple));
    assert_eq!(palette.color_for(5), Some(CategoryColor::Orange));
    assert_eq!(palette.color_for(6), None);
}

#[test]
fn test_color_keys() {
    assert_eq!("Purple".parse::<CategoryColor>(), Ok(CategoryColor::Purple));
    assert!("teal".parse::<CategoryColor>().is_err());
    assert_eq!(CategoryColor::Green.to_string(), "green");
    assert_eq!(CategoryColor::Yellow.difficulty(), "Easiest");
}

// ========== Validation ==========

#[test]
fn test_validate_ok() {
    assert!(validate(&sample(), &Limits::default()).is_ok());
}

#[test]
fn test_validate_duplicate_case_insensitive() {
    let mut p = sample();
    p.categories[1].items[3] = " apple".into();
    let issues = collect_issues(&p, &Limits::default());
    assert_eq!(issues, vec![ValidationIssue::DuplicateItem { item: "APPLE".into() }]);
}

#[test]
fn test_validate_collects_all() {
    let p = Puzzle::new(
        None,
        MistakeBudget::default(),
        vec![Category::new("", ["A", ""]), Category::new("B|C", ["D", "E", "F"])],
    );
    let issues = collect_issues(&p, &Limits::default());
    assert!(issues.contains(&ValidationIssue::MissingCategoryName { category: 0 }));
    assert!(issues.contains(&ValidationIssue::MissingItem { category: 0, item: 1 }));
    assert!(issues.contains(&ValidationIssue::UnevenCategory { category: 1, found: 3, expected: 2 }));
    assert!(issues
        .iter()
        .any(|i| matches!(i, ValidationIssue::ForbiddenCharacter { ch: '|', .. })));
}

#[test]
fn test_validate_grid_bounds() {
    let one = Puzzle::new(None, MistakeBudget::default(), vec![Category::new("A", ["X", "Y"])]);
    let issues = collect_issues(&one, &Limits::default());
    assert!(matches!(issues[0], ValidationIssue::CategoryCount { found: 1, .. }));

    let wide = Puzzle::new(
        None,
        MistakeBudget::default(),
        vec![
            Category::new("A", ["1", "2", "3", "4", "5", "6", "7"]),
            Category::new("B", ["8", "9", "10", "11", "12", "13", "14"]),
        ],
    );
    let issues = collect_issues(&wide, &Limits::default());
    assert!(matches!(issues[0], ValidationIssue::WordsPerCategory { found: 7, .. }));
}

#[test]
fn test_validation_error_message() {
    let err = validate(
        &Puzzle::new(None, MistakeBudget::default(), vec![Category::new("", ["A", "B"])]),
        &Limits::default(),
    )
    .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Category 1 needs a name."));
    assert!(msg.contains("between 2 and 6 categories"));
}

// ========== Library ==========

#[test]
fn test_library_playable() {
    let palette = Palette::default();
    for entry in library() {
        assert!(entry.puzzle.is_playable(&palette), "{} not playable", entry.id);
        assert!(validate(&entry.puzzle.normalized(), &Limits::default()).is_ok());
    }
}

#[test]
fn test_fallback_puzzle() {
    let p = fallback_puzzle();
    assert_eq!(p.categories.len(), 4);
    assert_eq!(p.categories[0].name, "Things that start with FIRE");
    assert_eq!(library::find("ohio").map(|e| e.name), Some("All About Ohio"));
}

// ========== Config ==========

#[test]
fn test_config_default_roundtrip() {
    let json = serde_json::to_string(&AppConfig::default()).unwrap();
    let config = AppConfig::from_json_str(&json).unwrap();
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.game.palette, Palette::default());
}

#[test]
fn test_config_env_overrides() {
    let config = AppConfig::default()
        .apply_env(|key| match key {
            "CP_PORT" => Some("9090".into()),
            "CP_BASE_URL" => Some("https://example.com/play".into()),
            _ => None,
        })
        .unwrap();
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.link.base_url, "https://example.com/play");
    assert_eq!(config.game.fallback_title, "Custom Puzzle");
}

#[test]
fn test_config_bad_port() {
    let err = AppConfig::default()
        .apply_env(|key| (key == "CP_PORT").then(|| "eighty".to_string()))
        .unwrap_err();
    assert!(matches!(err, CoreError::InvalidConfig(_)));
}

#[test]
fn test_config_limits_exceed_palette() {
    let mut config = AppConfig::default();
    config.game.palette = Palette::new(vec![CategoryColor::Yellow, CategoryColor::Green]);
    let json = serde_json::to_string(&config).unwrap();
    assert!(AppConfig::from_json_str(&json).is_err());
}
