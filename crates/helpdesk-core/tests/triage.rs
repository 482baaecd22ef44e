use helpdesk_core::triage::is_conversation_complete;

#[test]
fn closing_phrases_end_the_conversation() {
    for reply in [
        "Thank you, that's all I need for now. Our team will follow up soon.",
        "THANK YOU for the details.",
        "I have all the information I need.",
        "No further questions from me.",
        "That is all for now.",
        "Our team will follow up soon.",
        "Okay, that's ALL.",
    ] {
        assert!(is_conversation_complete(reply), "{reply:?} should close");
    }
}

#[test]
fn clarifying_questions_keep_the_conversation_open() {
    for reply in [
        "Which operating system are you using?",
        "When did the problem start?",
        "Thanks! Can you share the error message?",
        "",
    ] {
        assert!(!is_conversation_complete(reply), "{reply:?} should not close");
    }
}
