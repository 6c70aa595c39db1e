use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Top-level pages of the learner app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Page {
    Survey,
    Learning,
    PostQuiz,
    EndQuiz,
    Calculator,
    Reference,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Survey,
        Page::Learning,
        Page::PostQuiz,
        Page::EndQuiz,
        Page::Calculator,
        Page::Reference,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Page::Survey => "survey",
            Page::Learning => "learning",
            Page::PostQuiz => "postQuiz",
            Page::EndQuiz => "endQuiz",
            Page::Calculator => "calculator",
            Page::Reference => "reference",
        }
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown page: {}", s))
    }
}
