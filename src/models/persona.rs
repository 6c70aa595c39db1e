use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Engagement profile derived from the initial survey.
///
/// Serialized with the Chinese label the rest of the curriculum is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Persona {
    #[serde(rename = "領導者")]
    Leader,
    #[serde(rename = "研究者")]
    Researcher,
    #[serde(rename = "政策分析員")]
    PolicyAnalyst,
    #[serde(rename = "前瞻技術愛好者")]
    TechEnthusiast,
    #[serde(rename = "實踐行動家")]
    Activist,
    #[serde(rename = "綠色生活實踐家")]
    GreenLifestyler,
    #[serde(rename = "管理入門者")]
    ManagementNovice,
    #[serde(rename = "自覺消費者")]
    ConsciousConsumer,
}

impl Persona {
    pub const ALL: [Persona; 8] = [
        Persona::Leader,
        Persona::Researcher,
        Persona::PolicyAnalyst,
        Persona::TechEnthusiast,
        Persona::Activist,
        Persona::GreenLifestyler,
        Persona::ManagementNovice,
        Persona::ConsciousConsumer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Persona::Leader => "領導者",
            Persona::Researcher => "研究者",
            Persona::PolicyAnalyst => "政策分析員",
            Persona::TechEnthusiast => "前瞻技術愛好者",
            Persona::Activist => "實踐行動家",
            Persona::GreenLifestyler => "綠色生活實踐家",
            Persona::ManagementNovice => "管理入門者",
            Persona::ConsciousConsumer => "自覺消費者",
        }
    }

    pub fn english_name(self) -> &'static str {
        match self {
            Persona::Leader => "Leader",
            Persona::Researcher => "Researcher",
            Persona::PolicyAnalyst => "Policy Analyst",
            Persona::TechEnthusiast => "Tech Enthusiast",
            Persona::Activist => "Activist",
            Persona::GreenLifestyler => "Green Lifestyler",
            Persona::ManagementNovice => "Management Novice",
            Persona::ConsciousConsumer => "Conscious Consumer",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Persona {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Persona::ALL
            .into_iter()
            .find(|p| p.label() == s)
            .ok_or_else(|| format!("unknown persona: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_str() {
        for persona in Persona::ALL {
            assert_eq!(persona.label().parse::<Persona>().unwrap(), persona);
        }
    }

    #[test]
    fn serde_uses_chinese_label() {
        let json = serde_json::to_string(&Persona::ManagementNovice).unwrap();
        assert_eq!(json, "\"管理入門者\"");
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert!("綠色新手".parse::<Persona>().is_err());
    }
}
