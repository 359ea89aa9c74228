//! # Ingestion Store Tests
//!
//! These tests exercise the append-or-create behavior of the CSV store and
//! its fail-soft loading against missing, empty, and malformed files.

use anyhow::Result;
use surveyboard::{RatingRecord, SurveyError, ValidationError};
use surveyboard_test_utils::{header_count, TestSetup};

/// Verifies that every successful submission adds exactly one row, in call order.
#[test]
fn test_submissions_append_in_order() -> Result<()> {
    let setup = TestSetup::new()?;
    let store = setup.store();

    let inputs = [("Library", "8"), ("Dorm", "3"), ("Library", "6"), ("Klaus Atrium", "9")];
    for (i, (category, value)) in inputs.iter().enumerate() {
        store.submit(category, value)?;
        assert_eq!(store.load().len(), i + 1);
    }

    let expected: Vec<RatingRecord> = inputs
        .iter()
        .map(|(c, v)| RatingRecord::new(*c, *v))
        .collect();
    assert_eq!(store.load().rows(), expected.as_slice());
    Ok(())
}

/// Verifies that the header is written once, no matter how many rows follow.
#[test]
fn test_header_written_exactly_once() -> Result<()> {
    let setup = TestSetup::new()?;
    let store = setup.store();

    for rating in 1..=5 {
        store.submit("Dining Hall", &rating.to_string())?;
    }

    let text = setup.read_csv()?;
    assert_eq!(header_count(&text), 1);
    assert!(text.starts_with("category,value\n"));
    assert_eq!(text.lines().count(), 6);
    Ok(())
}

/// Verifies that a zero-length file is treated like a missing one and gets a header.
#[test]
fn test_empty_file_gets_header_on_first_submit() -> Result<()> {
    let setup = TestSetup::new()?;
    setup.write_csv("")?;

    setup.store().submit("Dorm", "5")?;

    assert_eq!(setup.read_csv()?, "category,value\nDorm,5\n");
    Ok(())
}

/// Verifies that blank inputs are rejected and leave the file untouched.
#[test]
fn test_blank_inputs_are_rejected_without_writing() -> Result<()> {
    let setup = TestSetup::new()?;
    let store = setup.store();

    for (category, value) in [("", "x"), ("x", ""), ("  ", "  ")] {
        let result = store.submit(category, value);
        assert!(
            matches!(result, Err(SurveyError::Validation(_))),
            "expected a validation error for ({category:?}, {value:?})"
        );
    }
    assert!(!store.exists_and_not_empty(), "no file should be created");

    store.submit("Library", "8")?;
    let before = setup.read_csv()?;
    let result = store.submit("Library", "   ");
    assert!(matches!(
        result,
        Err(SurveyError::Validation(ValidationError::EmptyValue))
    ));
    assert_eq!(setup.read_csv()?, before);
    assert_eq!(store.load().len(), 1);
    Ok(())
}

/// Verifies that stored fields are trimmed.
#[test]
fn test_submitted_fields_are_trimmed() -> Result<()> {
    let setup = TestSetup::new()?;
    let record = setup.store().submit("  Outdoor Greens ", " 10 ")?;

    assert_eq!(record, RatingRecord::new("Outdoor Greens", "10"));
    assert_eq!(setup.read_csv()?, "category,value\nOutdoor Greens,10\n");
    Ok(())
}

/// Verifies that values containing the delimiter survive a round trip via quoting.
#[test]
fn test_commas_are_quoted() -> Result<()> {
    let setup = TestSetup::new()?;
    let store = setup.store();
    store.submit("Student Center, 2nd floor", "7")?;

    assert_eq!(
        setup.read_csv()?,
        "category,value\n\"Student Center, 2nd floor\",7\n"
    );
    assert_eq!(store.load().rows()[0].category, "Student Center, 2nd floor");
    Ok(())
}

/// Verifies that loading a missing file yields an empty table with canonical columns.
#[test]
fn test_load_missing_file_is_empty() -> Result<()> {
    let setup = TestSetup::new()?;
    let table = setup.store().load();

    assert!(table.is_empty());
    assert_eq!(table.columns(), ["category", "value"]);
    Ok(())
}

/// Verifies that loading a zero-length file yields an empty table.
#[test]
fn test_load_zero_length_file_is_empty() -> Result<()> {
    let setup = TestSetup::new()?;
    setup.write_csv("")?;

    assert!(setup.store().load().is_empty());
    Ok(())
}

/// Verifies that a file with the wrong header degrades to an empty table.
#[test]
fn test_load_foreign_header_is_empty() -> Result<()> {
    let setup = TestSetup::new()?;
    setup.write_csv("name,score\nLibrary,8\n")?;

    assert!(setup.store().load().is_empty());
    Ok(())
}

/// Verifies that a ragged row makes the whole file degrade to an empty table.
#[test]
fn test_load_ragged_rows_is_empty() -> Result<()> {
    let setup = TestSetup::new()?;
    setup.write_csv("category,value\nLibrary,8\nDorm,3,extra\n")?;

    assert!(setup.store().load().is_empty());
    Ok(())
}

/// Verifies that columns are located by name rather than position.
#[test]
fn test_load_reordered_columns() -> Result<()> {
    let setup = TestSetup::new()?;
    setup.write_csv("value,category\n8,Library\n")?;

    let table = setup.store().load();
    assert_eq!(table.rows(), &[RatingRecord::new("Library", "8")]);
    Ok(())
}

/// Verifies that a header-only file loads as an empty table and accepts appends.
#[test]
fn test_header_only_file() -> Result<()> {
    let setup = TestSetup::new()?;
    setup.write_csv("category,value\n")?;
    let store = setup.store();

    assert!(store.load().is_empty());
    store.submit("Library", "8")?;
    assert_eq!(setup.read_csv()?, "category,value\nLibrary,8\n");
    Ok(())
}

/// Verifies that a file with someone else's header is not appended to, so
/// the row count seen by `load` never drifts from what `submit` reports.
#[test]
fn test_submit_refuses_foreign_header() -> Result<()> {
    let setup = TestSetup::new()?;
    setup.write_csv("name,score\nLibrary,8\n")?;
    let store = setup.store();
    let before = store.load().len();

    let result = store.submit("Dorm", "5");
    assert!(
        matches!(result, Err(SurveyError::ForeignLayout { .. })),
        "expected a layout error, got {result:?}"
    );
    assert_eq!(store.load().len(), before);
    assert_eq!(setup.read_csv()?, "name,score\nLibrary,8\n");
    Ok(())
}

/// Verifies that a file holding only blank lines is rewritten with a header,
/// so the first submission is readable.
#[test]
fn test_submit_to_blank_line_file() -> Result<()> {
    let setup = TestSetup::new()?;
    setup.write_csv("\n")?;
    let store = setup.store();
    let before = store.load().len();

    store.submit("Dorm", "5")?;

    assert_eq!(store.load().len(), before + 1);
    assert_eq!(store.load().rows(), &[RatingRecord::new("Dorm", "5")]);
    assert_eq!(setup.read_csv()?, "category,value\nDorm,5\n");
    Ok(())
}

/// Verifies that a file with a malformed row is not appended to either.
#[test]
fn test_submit_refuses_ragged_file() -> Result<()> {
    let setup = TestSetup::new()?;
    let contents = "category,value\nLibrary,8\nDorm,3,extra\n";
    setup.write_csv(contents)?;

    let result = setup.store().submit("Cafe", "6");
    assert!(matches!(result, Err(SurveyError::ForeignLayout { .. })));
    assert_eq!(setup.read_csv()?, contents);
    Ok(())
}

/// Verifies that each accepted submission on a valid existing file adds exactly one loadable row.
#[test]
fn test_submit_grows_existing_file_by_one() -> Result<()> {
    let setup = TestSetup::new()?;
    setup.write_csv("value,category\n8,Library\n")?;
    let store = setup.store();
    let before = store.load().len();

    store.submit("Dorm", "5")?;

    let table = store.load();
    assert_eq!(table.len(), before + 1);
    assert_eq!(table.rows()[1], RatingRecord::new("Dorm", "5"));
    Ok(())
}
