//! Mock AI assistant
//!
//! Answers with keyword-matched or canned replies in the requested language
//! after an artificial, bounded delay. There is no model behind it.

use super::ServiceError;
use crate::constants::assistant;
use crate::context::Locale;
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Produces a reply to a user message
pub trait ResponseGenerator {
    /// `context` carries extra material, such as a workflow summary, to answer about
    fn respond(&mut self, message: &str, locale: Locale, context: Option<&str>) -> Result<String, ServiceError>;
}

/// Tunables for the mock assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantSettings {
    pub model: String,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub history_limit: usize,
}

impl AssistantSettings {
    /// No artificial delay
    pub fn instant() -> Self {
        Self {
            min_delay_ms: 0,
            max_delay_ms: 0,
            ..Self::default()
        }
    }
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            model: assistant::MODEL_NAME.to_string(),
            min_delay_ms: assistant::MIN_DELAY_MS,
            max_delay_ms: assistant::MAX_DELAY_MS,
            history_limit: assistant::HISTORY_LIMIT,
        }
    }
}

/// Who said a history line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

struct KeywordRule {
    keywords: &'static [&'static str],
    english: &'static str,
    arabic: &'static str,
}

static RULES: Lazy<Vec<KeywordRule>> = Lazy::new(|| {
    vec![
        KeywordRule {
            keywords: &["hello", "hi", "hey", "مرحبا", "السلام", "اهلا", "أهلا"],
            english: "Hello! I can help you design automation workflows. What would you like to build?",
            arabic: "مرحباً! يمكنني مساعدتك في تصميم سير العمل الآلي. ماذا تريد أن تبني؟",
        },
        KeywordRule {
            keywords: &["trigger", "start", "مشغل", "بدء"],
            english: "Every workflow begins with a trigger. Drag a Trigger node onto the canvas, then connect actions after it.",
            arabic: "يبدأ كل سير عمل بمشغل. اسحب عقدة المشغل إلى اللوحة ثم اربط الإجراءات بعدها.",
        },
        KeywordRule {
            keywords: &["schedule", "cron", "daily", "جدولة", "يومي"],
            english: "Use a Schedule node to run a workflow at fixed times, for example every morning at 9.",
            arabic: "استخدم عقدة الجدولة لتشغيل سير العمل في أوقات محددة، مثل كل صباح في التاسعة.",
        },
        KeywordRule {
            keywords: &["condition", "if", "branch", "شرط", "إذا"],
            english: "A Condition node splits the flow. Connect one path for when the check passes and another for when it fails.",
            arabic: "عقدة الشرط تقسم التدفق. اربط مساراً عند نجاح التحقق وآخر عند فشله.",
        },
        KeywordRule {
            keywords: &["integration", "api", "webhook", "تكامل", "ربط"],
            english: "Integration nodes connect external services. Add one, then describe the service in its properties.",
            arabic: "عقد التكامل تربط الخدمات الخارجية. أضف واحدة ثم صف الخدمة في خصائصها.",
        },
        KeywordRule {
            keywords: &["workflow", "flow", "سير العمل", "تدفق"],
            english: "Build a workflow by dropping nodes from the palette and connecting them from trigger to output.",
            arabic: "ابنِ سير العمل بإسقاط العقد من اللوحة الجانبية وربطها من المشغل إلى المخرج.",
        },
        KeywordRule {
            keywords: &["help", "how", "مساعدة", "كيف"],
            english: "Drag nodes from the palette, pan with the middle mouse button, zoom with the wheel, and press Fit to see everything.",
            arabic: "اسحب العقد من اللوحة الجانبية، وحرّك العرض بزر الفأرة الأوسط، وكبّر بالعجلة، واضغط ملاءمة لرؤية كل شيء.",
        },
    ]
});

const GENERIC_EN: &[&str] = &[
    "That sounds like a good fit for an automated workflow. Which step should happen first?",
    "Interesting! Try sketching it on the canvas and I can review the flow.",
    "I can help with that. Tell me what should trigger it and what the result should be.",
];

const GENERIC_AR: &[&str] = &[
    "يبدو هذا مناسباً لسير عمل آلي. ما الخطوة التي يجب أن تحدث أولاً؟",
    "فكرة مثيرة! جرّب رسمها على اللوحة وسأراجع التدفق.",
    "يمكنني المساعدة في ذلك. أخبرني ما الذي يشغّله وما النتيجة المطلوبة.",
];

/// Whole-word match; phrases with spaces match as substrings
fn mentions(text: &str, keyword: &str) -> bool {
    if keyword.contains(' ') {
        return text.contains(keyword);
    }
    text.split(|c: char| !c.is_alphanumeric())
        .any(|word| word == keyword)
}

/// Canned-response stand-in for a hosted model
pub struct MockAssistant {
    settings: AssistantSettings,
    history: VecDeque<(Speaker, String)>,
    rng: StdRng,
}

impl MockAssistant {
    pub fn new(settings: AssistantSettings) -> Self {
        Self {
            settings,
            history: VecDeque::new(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic replies for a given seed
    pub fn with_seed(settings: AssistantSettings, seed: u64) -> Self {
        Self {
            settings,
            history: VecDeque::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn settings(&self) -> &AssistantSettings {
        &self.settings
    }

    /// Rolling history, oldest first
    pub fn history(&self) -> impl Iterator<Item = &(Speaker, String)> {
        self.history.iter()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn remember(&mut self, speaker: Speaker, text: &str) {
        self.history.push_back((speaker, text.to_string()));
        while self.history.len() > self.settings.history_limit {
            self.history.pop_front();
        }
    }

    /// Latency for the next reply, within the configured bounds
    pub fn next_delay(&mut self) -> Duration {
        let min = self.settings.min_delay_ms;
        let max = self.settings.max_delay_ms.max(min);
        let millis = if max == min {
            min
        } else {
            self.rng.random_range(min..=max)
        };
        Duration::from_millis(millis)
    }

    fn compose(&mut self, message: &str, locale: Locale, context: Option<&str>) -> String {
        let lowered = message.to_lowercase();
        let tip = RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|keyword| mentions(&lowered, keyword)))
            .map(|rule| match locale {
                Locale::English => rule.english,
                Locale::Arabic => rule.arabic,
            });

        if let Some(context) = context.filter(|c| !c.trim().is_empty()) {
            let intro = match locale {
                Locale::English => "Here is what I see in your workflow:",
                Locale::Arabic => "إليك ما أراه في سير العمل الخاص بك:",
            };
            let mut reply = format!("{}\n{}", intro, context.trim());
            if let Some(tip) = tip {
                reply.push_str("\n\n");
                reply.push_str(tip);
            }
            return reply;
        }

        if let Some(tip) = tip {
            return tip.to_string();
        }

        let pool = match locale {
            Locale::English => GENERIC_EN,
            Locale::Arabic => GENERIC_AR,
        };
        pool[self.rng.random_range(0..pool.len())].to_string()
    }
}

impl ResponseGenerator for MockAssistant {
    fn respond(&mut self, message: &str, locale: Locale, context: Option<&str>) -> Result<String, ServiceError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ServiceError::EmptyMessage);
        }

        self.remember(Speaker::User, message);
        let delay = self.next_delay();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }

        let reply = self.compose(message, locale, context);
        log::debug!("{} replied after {:?}", self.settings.model, delay);
        self.remember(Speaker::Assistant, &reply);
        Ok(reply)
    }
}
