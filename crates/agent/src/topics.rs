//! General plan questions answered outside any task

use plan_assistant_config::EnrollmentPolicyConfig;
use plan_assistant_core::TaskType;
use plan_assistant_text_processing::phrases::{contains_any, normalize};

use crate::catalog::format_percent;

/// Quick replies for the idle menu
pub const MENU_REPLIES: &[&str] = &[
    "Take a loan",
    "Enroll in a plan",
    "Make a withdrawal",
    "Ask about contributions",
];

/// Menu text offered when nothing is running
pub const MENU_TEXT: &str = "I can help you take a loan, enroll in a plan or make a withdrawal. \
     You can also ask me about contributions, investments or beneficiaries.";

/// Quick reply that accepts a topic's offer
pub const TAKE_ME_THERE: &str = "Take me there";

/// An answer with an optional offer to start a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub id: &'static str,
    keywords: &'static [&'static str],
    pub answer: String,
    pub offer: Option<TaskType>,
}

/// Topic answers, worded from the configured plan limits
#[derive(Debug, Clone)]
pub struct TopicTable {
    topics: Vec<Topic>,
}

impl TopicTable {
    pub fn new(enrollment: &EnrollmentPolicyConfig) -> Self {
        let topics = vec![
            Topic {
                id: "contribution",
                keywords: &["contribution", "contributions", "contribute", "match", "matching", "deferral"],
                answer: format!(
                    "You choose what percentage of each paycheck goes into your plan, anywhere \
                     from {} to {}. Contributions come out automatically every payday. \
                     Would you like me to take you to enrollment?",
                    format_percent(enrollment.min_contribution_percent),
                    format_percent(enrollment.max_contribution_percent)
                ),
                offer: Some(TaskType::Enrollment),
            },
            Topic {
                id: "investment",
                keywords: &["investment", "investments", "invest", "invested", "fund", "funds", "allocation"],
                answer: "You can invest in a target-date fund, have a managed portfolio, or pick \
                         your own funds. You choose when you enroll. Would you like me to take \
                         you there?"
                    .to_string(),
                offer: Some(TaskType::Enrollment),
            },
            Topic {
                id: "beneficiary",
                keywords: &["beneficiary", "beneficiaries", "heir", "heirs"],
                answer: "Your beneficiary receives your account if something happens to you. \
                         Once you're enrolled you can name or change beneficiaries from your \
                         profile at any time. Would you like me to take you to enrollment?"
                    .to_string(),
                offer: Some(TaskType::Enrollment),
            },
        ];
        Self { topics }
    }

    /// Topic the question is about, if any
    pub fn find(&self, text: &str) -> Option<&Topic> {
        let normalized = normalize(text);
        self.topics
            .iter()
            .find(|topic| contains_any(&normalized, topic.keywords))
    }
}

impl Default for TopicTable {
    fn default() -> Self {
        Self::new(&EnrollmentPolicyConfig::default())
    }
}

/// Whether `text` accepts a pending "take me there" offer
pub fn accepts_offer(text: &str) -> bool {
    contains_any(&normalize(text), &["take me there", "take me", "go there", "let's go"])
}
