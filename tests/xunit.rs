use std::{fs, time::Duration};

use mamba_formatters::{
    tree::{Outcome, ResultTree},
    writer::XUnit,
    Reporter,
};

fn single_example_tree() -> ResultTree {
    let mut tree = ResultTree::new();
    let group = tree.add_group_with_subject(None, "Calculator_spec", "Calculator");
    _ = tree.add_example(
        Some(group),
        "it_adds",
        Duration::from_millis(7),
        Outcome::Passed,
    );
    tree.finish_group(group, Duration::from_millis(8));
    tree
}

#[test]
fn single_example_report() {
    let tree = single_example_tree();
    let mut reporter = Reporter::new(XUnit::new(Vec::new()));

    _ = reporter.run(&tree).unwrap();

    let root = reporter.document();
    assert_eq!(root.tag(), "testsuites");
    assert_eq!(root.get("name"), Some("mamba"));
    assert_eq!(root.get("tests"), Some("1"));
    assert_eq!(root.get("failures"), Some("0"));
    assert_eq!(root.get("disabled"), Some("0"));
    assert_ne!(root.get("time"), Some("0"));
    assert_eq!(root.get("time"), Some("0.0080"));

    let suites = root.find_all("testsuite").collect::<Vec<_>>();
    assert_eq!(suites.len(), 1);
    assert_eq!(suites[0].get("name"), Some("Calculator"));
    assert_eq!(suites[0].get("tests"), Some("1"));
    assert_eq!(suites[0].get("time"), Some("0.0080"));

    let cases = suites[0].find_all("testcase").collect::<Vec<_>>();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].get("name"), Some("it_adds"));
}

#[test]
fn writes_whole_document() {
    let tree = single_example_tree();
    let mut reporter = Reporter::new(XUnit::new(Vec::new()));

    _ = reporter.run(&tree).unwrap();

    let xml = String::from_utf8(reporter.into_inner().into_inner()).unwrap();
    assert_eq!(
        xml,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <testsuites name=\"mamba\" tests=\"1\" failures=\"0\" disabled=\"0\" \
         time=\"0.0080\">\n\
         \x20 <testsuite name=\"Calculator\" tests=\"1\" time=\"0.0080\">\n\
         \x20   <testcase name=\"it_adds\"/>\n\
         \x20 </testsuite>\n\
         </testsuites>\n",
    );
}

#[test]
fn totals_come_from_summary_while_suites_count_started_examples() {
    let mut tree = ResultTree::new();
    let group = tree.add_group(None, "Parser");
    _ = tree.add_example(Some(group), "it_parses", Duration::ZERO, Outcome::Passed);
    _ = tree.add_example(
        Some(group),
        "it_rejects_garbage",
        Duration::ZERO,
        Outcome::failed("no error raised", Vec::<String>::new()),
    );
    _ = tree.add_example(Some(group), "it_recovers", Duration::ZERO, Outcome::Pending);
    let later = tree.add_pending_group(Some(group), "streaming");
    _ = tree.add_example(Some(later), "it_parses_chunks", Duration::ZERO, Outcome::Pending);
    tree.finish_group(group, Duration::from_millis(15));
    let mut reporter = Reporter::new(XUnit::new(Vec::new()));

    _ = reporter.run(&tree).unwrap();

    let root = reporter.document();
    assert_eq!(root.get("tests"), Some("4"));
    assert_eq!(root.get("failures"), Some("1"));
    assert_eq!(root.get("disabled"), Some("2"));

    let suites = root.find_all("testsuite").collect::<Vec<_>>();
    assert_eq!(suites.len(), 1, "pending groups produce no testsuite");
    assert_eq!(suites[0].get("tests"), Some("2"));
    assert_eq!(
        suites[0]
            .find_all("testcase")
            .filter_map(|c| c.get("name"))
            .collect::<Vec<_>>(),
        ["it_parses", "it_rejects_garbage"],
    );
}

#[test]
fn writes_report_into_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let tree = single_example_tree();

    _ = Reporter::new(XUnit::new(file.as_file_mut())).run(&tree).unwrap();

    let xml = fs::read_to_string(file.path()).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<testcase name=\"it_adds\"/>"));
    assert!(xml.ends_with("</testsuites>\n"));
}
