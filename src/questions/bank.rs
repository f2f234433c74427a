use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BankQuestion {
    pub id: i32,
    pub text: &'static str,
}

/// The fixed, ordered question bank. Assignment always walks it front to back.
pub static QUESTION_BANK: &[BankQuestion] = &[
    BankQuestion {
        id: 1,
        text: "Tell me about yourself.",
    },
    BankQuestion {
        id: 2,
        text: "What are your strengths?",
    },
    BankQuestion {
        id: 3,
        text: "Describe a challenge you faced.",
    },
];
