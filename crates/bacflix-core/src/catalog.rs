//! Static reference data: branches, subjects, flashcards and quotes.
//!
//! A branch is a curriculum track with its own weighted subject list.
//! The catalog is immutable; the controller copies a branch's subjects
//! when the branch is selected, so mastery edits never leak back here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Self-assessed proficiency tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mastery {
    Low,
    Med,
    High,
}

impl Mastery {
    /// Priority rank used by the plan generator. Weaker subjects rank higher.
    pub fn rank(&self) -> u8 {
        match self {
            Mastery::Low => 3,
            Mastery::Med => 2,
            Mastery::High => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mastery::Low => "low",
            Mastery::Med => "med",
            Mastery::High => "high",
        }
    }
}

impl Default for Mastery {
    fn default() -> Self {
        Mastery::Med
    }
}

impl fmt::Display for Mastery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mastery {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Mastery::Low),
            "med" | "medium" => Ok(Mastery::Med),
            "high" => Ok(Mastery::High),
            other => Err(ValidationError::InvalidValue {
                field: "lvl".into(),
                message: format!("expected one of low, med, high; got '{other}'"),
            }),
        }
    }
}

/// A subject within a branch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subject {
    pub name: String,
    /// Weight of the subject in the final exam.
    pub coeff: u32,
    pub lvl: Mastery,
}

impl Subject {
    pub fn new(name: impl Into<String>, coeff: u32, lvl: Mastery) -> Self {
        Self {
            name: name.into(),
            coeff,
            lvl,
        }
    }
}

/// A curriculum track.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Branch {
    pub id: String,
    pub name: String,
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flashcard {
    pub q: String,
    pub a: String,
    pub category: String,
}

/// All cards of one subject, in presentation order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlashcardDeck {
    pub subject: String,
    pub cards: Vec<Flashcard>,
}

/// Days of the planning week, Saturday through Thursday.
pub const DAY_LABELS: [&str; 6] = [
    "السبت",
    "الأحد",
    "الاثنين",
    "الثلاثاء",
    "الأربعاء",
    "الخميس",
];

pub const QUOTES: [&str; 4] = [
    "النجاح ليس نهاية الطريق، بل هو المحاولة المستمرة.",
    "العلم نور والجهل ظلام — ابدأ بخطوة واحدة.",
    "الانضباط يفعل ما لا تستطيع الإرادة وحدها فعله.",
    "كل دقيقة مراجعة اليوم = ساعة راحة في يوم الامتحان.",
];

/// Read-only reference data shared by every component.
#[derive(Debug, Clone)]
pub struct Catalog {
    branches: Vec<Branch>,
    decks: Vec<FlashcardDeck>,
}

impl Catalog {
    pub fn new(branches: Vec<Branch>, decks: Vec<FlashcardDeck>) -> Self {
        Self { branches, decks }
    }

    /// The built-in baccalaureate catalog.
    pub fn builtin() -> Self {
        Self::new(builtin_branches(), builtin_decks())
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn branch(&self, id: &str) -> Option<&Branch> {
        self.branches.iter().find(|b| b.id == id)
    }

    /// The first branch, used when nothing else is selected.
    pub fn default_branch(&self) -> Option<&Branch> {
        self.branches.first()
    }

    pub fn decks(&self) -> &[FlashcardDeck] {
        &self.decks
    }

    pub fn deck(&self, subject: &str) -> Option<&FlashcardDeck> {
        self.decks.iter().find(|d| d.subject == subject)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn subjects(list: &[(&str, u32)]) -> Vec<Subject> {
    list.iter()
        .map(|(name, coeff)| Subject::new(*name, *coeff, Mastery::Med))
        .collect()
}

fn card(q: &str, a: &str, category: &str) -> Flashcard {
    Flashcard {
        q: q.into(),
        a: a.into(),
        category: category.into(),
    }
}

fn builtin_branches() -> Vec<Branch> {
    vec![
        Branch {
            id: "math".into(),
            name: "شعبة رياضيات".into(),
            subjects: subjects(&[
                ("الرياضيات", 7),
                ("العلوم الفيزيائية", 6),
                ("اللغة العربية", 3),
                ("الفلسفة", 2),
                ("اللغة الفرنسية", 2),
                ("اللغة الإنجليزية", 2),
            ]),
        },
        Branch {
            id: "science".into(),
            name: "علوم تجريبية".into(),
            subjects: subjects(&[
                ("علوم الطبيعة و الحياة", 6),
                ("العلوم الفيزيائية", 5),
                ("الرياضيات", 5),
                ("اللغة العربية", 3),
                ("الفلسفة", 2),
            ]),
        },
        Branch {
            id: "tech".into(),
            name: "تقني رياضي".into(),
            subjects: subjects(&[
                ("التكنولوجيا", 7),
                ("الرياضيات", 6),
                ("العلوم الفيزيائية", 6),
                ("اللغة العربية", 3),
            ]),
        },
    ]
}

fn builtin_decks() -> Vec<FlashcardDeck> {
    vec![
        FlashcardDeck {
            subject: "الرياضيات".into(),
            cards: vec![
                card("مشتقة sin(x)؟", "cos(x)", "الاشتقاق"),
                card("مشتقة ln(x)؟", "1/x", "الدوال"),
                card("معادلة المماس عند x0؟", "y = f'(x0)(x-x0) + f(x0)", "الدوال"),
            ],
        },
        FlashcardDeck {
            subject: "العلوم الفيزيائية".into(),
            cards: vec![
                card("قانون نيوتن الثاني؟", "ΣF = m.a", "الميكانيك"),
                card("قانون أوم؟", "U = R.I", "الكهرباء"),
            ],
        },
    ]
}
