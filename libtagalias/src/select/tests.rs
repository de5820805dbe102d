use super::*;

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn limit(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

// Version comparison

#[test]
fn test_version_cmp_numeric_not_lexicographic() {
    assert_eq!(version_cmp("1.10", "1.9"), Ordering::Greater);
    assert_eq!(version_cmp("2.9", "2.10"), Ordering::Less);
}

#[test]
fn test_version_cmp_equal() {
    assert_eq!(version_cmp("1.7.3", "1.7.3"), Ordering::Equal);
}

#[test]
fn test_version_cmp_missing_run_is_lower() {
    assert_eq!(version_cmp("1.7", "1.7.3"), Ordering::Less);
    assert_eq!(version_cmp("1.7-alpine", "1.7"), Ordering::Greater);
}

#[test]
fn test_version_cmp_text_runs_lexicographic() {
    assert_eq!(version_cmp("1.0-alpine", "1.0-bookworm"), Ordering::Less);
}

#[test]
fn test_version_cmp_large_numbers_do_not_overflow() {
    assert_eq!(
        version_cmp("20240101123456789012345", "20240101123456789012344"),
        Ordering::Greater
    );
}

#[test]
fn test_version_cmp_leading_zeros_fall_back_to_string_order() {
    assert_eq!(version_cmp("1.01", "1.1"), Ordering::Less);
    assert_eq!(version_cmp("1.1", "1.01"), Ordering::Greater);
}

#[test]
fn test_runs_split() {
    assert_eq!(
        runs("v1.10-rc2"),
        vec![
            Run::Text("v"),
            Run::Number("1"),
            Run::Text("."),
            Run::Number("10"),
            Run::Text("-rc"),
            Run::Number("2"),
        ]
    );
    assert!(runs("").is_empty());
}

// Selection

#[test]
fn test_select_sorts_descending_by_version() {
    let selection = select_tags(&tags(&["1.9", "1.10", "1.2"]), "", limit(25));
    assert_eq!(selection.tags, vec!["1.10", "1.9", "1.2"]);
}

#[test]
fn test_select_substring_filter() {
    let selection = select_tags(&tags(&["1.7.0", "1.8.0", "2.1.7"]), "1.7", limit(25));
    assert_eq!(selection.tags, vec!["2.1.7", "1.7.0"]);
}

#[test]
fn test_select_substring_filter_matches_anywhere() {
    let selection = select_tags(&tags(&["1.7.0", "21.7.0"]), "1.7", limit(25));
    assert_eq!(selection.tags, vec!["21.7.0", "1.7.0"]);
}

#[test]
fn test_select_filter_is_case_sensitive() {
    let selection = select_tags(&tags(&["1.0-Alpine", "1.0-alpine"]), "alpine", limit(25));
    assert_eq!(selection.tags, vec!["1.0-alpine"]);
}

#[test]
fn test_select_empty_filter_keeps_all() {
    let selection = select_tags(&tags(&["a", "b", "c"]), "", limit(25));
    assert_eq!(selection.matched, 3);
}

#[test]
fn test_select_removes_windows_case_insensitively() {
    let input = tags(&[
        "1.0",
        "1.0-Windows",
        "1.0-windowsservercore-ltsc2022",
        "1.0-nanoserver-WINDOWS",
    ]);
    let selection = select_tags(&input, "", limit(25));
    assert_eq!(selection.tags, vec!["1.0"]);
}

#[test]
fn test_select_windows_removed_even_when_filter_matches() {
    let selection = select_tags(&tags(&["1.0-Windows", "1.0-linux"]), "Windows", limit(25));
    assert!(selection.tags.is_empty());
    assert_eq!(selection.matched, 0);
}

#[test]
fn test_select_truncates_to_limit() {
    let input: Vec<String> = (0..100).map(|i| format!("1.{}", i)).collect();
    let selection = select_tags(&input, "", limit(25));

    assert_eq!(selection.tags.len(), 25);
    assert_eq!(selection.tags[0], "1.99");
    assert_eq!(selection.tags[24], "1.75");
    assert_eq!(selection.matched, 100);
    assert_eq!(selection.total, 100);
    assert!(selection.is_truncated());
}

#[test]
fn test_select_fewer_tags_than_limit_returns_all() {
    let selection = select_tags(&tags(&["2.0", "1.0"]), "", limit(25));
    assert_eq!(selection.tags, vec!["2.0", "1.0"]);
    assert!(!selection.is_truncated());
}

#[test]
fn test_select_counts_before_filter_and_before_truncation() {
    let input = tags(&["1.7.1", "1.7.2", "1.7.3", "1.8.0", "1.7-windows"]);
    let selection = select_tags(&input, "1.7", limit(2));

    assert_eq!(selection.tags, vec!["1.7.3", "1.7.2"]);
    assert_eq!(selection.matched, 3);
    assert_eq!(selection.total, 5);
}

#[test]
fn test_select_empty_list() {
    let selection = select_tags(&[], "", limit(25));
    assert!(selection.tags.is_empty());
    assert_eq!(selection.total, 0);
}
