use crate::{Journal, JournalEventKind};

#[test]
fn test_journal_records_in_order() {
    let journal = Journal::new(16);

    journal.record(JournalEventKind::IdentityChanged, "u1");
    journal.record(JournalEventKind::AttemptStarted, "u1");
    journal.record(JournalEventKind::AttemptSucceeded, "u1");

    let entries = journal.snapshot();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].kind, JournalEventKind::IdentityChanged);
    assert_eq!(entries[2].kind, JournalEventKind::AttemptSucceeded);
}

#[test]
fn test_journal_is_bounded() {
    let journal = Journal::new(16);

    for i in 0..40 {
        journal.record(JournalEventKind::IdentityChanged, format!("u{i}"));
    }

    let entries = journal.snapshot();
    assert_eq!(entries.len(), 16);
    // Oldest entries fell off the front
    assert_eq!(entries[0].detail, "u24");
    assert_eq!(entries[15].detail, "u39");
}

#[test]
fn test_journal_entries_serialize() {
    let journal = Journal::new(16);
    journal.record(JournalEventKind::GuestOverrideSet, "g1");

    let json = serde_json::to_value(journal.snapshot()).unwrap();
    assert_eq!(json[0]["kind"], "guest_override_set");
    assert_eq!(json[0]["detail"], "g1");
}
