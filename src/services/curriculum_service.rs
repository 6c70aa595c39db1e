//! Fixed lesson catalogue and quiz answer keys.

use serde::Serialize;

use crate::models::persona::Persona;
use crate::models::personal_info::College;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Lesson {
    pub title: &'static str,
    pub minutes: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Module {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub lessons: &'static [Lesson],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LearningPath {
    pub title: &'static str,
    pub description: &'static str,
    pub modules: &'static [Module],
}

/// Everything one learner sees on the learning page.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Catalogue {
    pub common: &'static [Module],
    pub persona: &'static LearningPath,
    pub college: &'static LearningPath,
}

impl Catalogue {
    pub fn modules(&self) -> impl Iterator<Item = &'static Module> {
        self.common
            .iter()
            .chain(self.persona.modules.iter())
            .chain(self.college.modules.iter())
    }

    pub fn contains(&self, module_id: &str, lesson_title: &str) -> bool {
        self.modules()
            .filter(|m| m.id == module_id)
            .any(|m| m.lessons.iter().any(|l| l.title == lesson_title))
    }
}

const fn lesson(title: &'static str, minutes: u32) -> Lesson {
    Lesson { title, minutes }
}

pub static COMMON_MODULES: [Module; 2] = [
    Module {
        id: "carbon-basics",
        title: "碳排放基礎概念",
        description: "了解什麼是碳排放、溫室效應與氣候變遷的關係",
        lessons: &[
            lesson("什麼是碳排放？", 15),
            lesson("溫室效應原理", 15),
            lesson("碳足跡計算方式", 20),
        ],
    },
    Module {
        id: "climate-change",
        title: "氣候變遷影響",
        description: "探討氣候變遷對環境、經濟與社會的影響",
        lessons: &[
            lesson("全球暖化現況", 7),
            lesson("極端氣候事件", 6),
            lesson("對台灣的影響", 8),
        ],
    },
];

static LEADER_PATH: LearningPath = LearningPath {
    title: "👑 領導者學習路徑",
    description: "培養環境議題領導力，引領團隊永續發展",
    modules: &[
        Module {
            id: "leadership-strategy",
            title: "永續領導策略",
            description: "如何在組織中推動永續文化",
            lessons: &[
                lesson("建立永續願景與使命", 15),
                lesson("組織變革與永續轉型", 20),
                lesson("跨部門永續合作機制", 18),
                lesson("永續領導力培養", 22),
            ],
        },
        Module {
            id: "leadership-decision",
            title: "碳管理決策框架",
            description: "制定與執行減碳策略",
            lessons: &[
                lesson("減碳目標設定方法", 18),
                lesson("資源配置與優先順序", 15),
                lesson("績效評估與改善", 20),
            ],
        },
    ],
};

static RESEARCHER_PATH: LearningPath = LearningPath {
    title: "🔬 研究者學習路徑",
    description: "深入研究碳排放數據與減碳技術",
    modules: &[
        Module {
            id: "research-methods",
            title: "碳排放研究方法",
            description: "科學化的數據收集與分析",
            lessons: &[
                lesson("碳排放數據收集方法", 20),
                lesson("生命週期評估（LCA）入門", 25),
                lesson("碳足跡計算科學方法", 22),
                lesson("統計分析與數據視覺化", 18),
            ],
        },
        Module {
            id: "research-trends",
            title: "減碳技術研究趨勢",
            description: "最新的學術研究與技術發展",
            lessons: &[
                lesson("負碳技術研究現況", 20),
                lesson("再生能源效率研究", 18),
                lesson("氣候模型與預測", 25),
            ],
        },
    ],
};

static POLICY_ANALYST_PATH: LearningPath = LearningPath {
    title: "📋 政策分析員學習路徑",
    description: "解讀氣候政策，掌握法規動態",
    modules: &[
        Module {
            id: "policy-domestic",
            title: "國內氣候政策法規",
            description: "台灣氣候相關法規與政策",
            lessons: &[
                lesson("氣候變遷因應法解析", 25),
                lesson("溫室氣體減量及管理法", 20),
                lesson("台灣碳交易制度", 22),
                lesson("企業碳揭露法規要求", 18),
            ],
        },
        Module {
            id: "policy-international",
            title: "國際碳定價機制",
            description: "全球氣候政策比較分析",
            lessons: &[
                lesson("CBAM 歐盟碳邊境調整機制", 25),
                lesson("各國碳稅制度比較", 20),
                lesson("國際碳市場連結", 22),
            ],
        },
    ],
};

static TECH_ENTHUSIAST_PATH: LearningPath = LearningPath {
    title: "🚀 前瞻技術愛好者學習路徑",
    description: "探索最新減碳科技與創新解決方案",
    modules: &[
        Module {
            id: "tech-ccus",
            title: "碳捕捉與封存技術",
            description: "CCUS 技術原理與應用",
            lessons: &[
                lesson("碳捕捉技術原理", 20),
                lesson("碳封存與利用方案", 22),
                lesson("直接空氣捕捉（DAC）", 18),
                lesson("CCUS 商業應用案例", 15),
            ],
        },
        Module {
            id: "tech-energy",
            title: "新興能源技術",
            description: "氫能與綠色能源創新",
            lessons: &[
                lesson("綠氫生產與應用", 22),
                lesson("儲能技術突破", 20),
                lesson("智慧電網與能源管理", 18),
            ],
        },
    ],
};

static ACTIVIST_PATH: LearningPath = LearningPath {
    title: "💪 實踐行動家學習路徑",
    description: "從行動開始，推動社區環保改變",
    modules: &[
        Module {
            id: "action-community",
            title: "社區減碳行動",
            description: "組織與推動社區環保活動",
            lessons: &[
                lesson("如何組織社區減碳行動", 18),
                lesson("社區能源合作社", 20),
                lesson("在地環保倡議技巧", 15),
                lesson("成功社區案例分析", 22),
            ],
        },
        Module {
            id: "action-advocacy",
            title: "環境倡議實務",
            description: "與政府和企業對話的方法",
            lessons: &[
                lesson("公民參與氣候政策", 20),
                lesson("環保運動策略規劃", 18),
                lesson("媒體溝通與公關技巧", 15),
            ],
        },
    ],
};

static GREEN_LIFESTYLER_PATH: LearningPath = LearningPath {
    title: "🌿 綠色生活實踐家學習路徑",
    description: "將永續理念融入日常生活",
    modules: &[
        Module {
            id: "lifestyle-daily",
            title: "日常減碳實踐",
            description: "從生活中的小事做起",
            lessons: &[
                lesson("低碳飲食與在地食材", 15),
                lesson("綠色交通選擇指南", 12),
                lesson("家庭節能與用電管理", 18),
                lesson("零廢棄生活實踐", 20),
            ],
        },
        Module {
            id: "lifestyle-home",
            title: "永續居家改造",
            description: "建立環保的生活空間",
            lessons: &[
                lesson("居家節能改造指南", 20),
                lesson("永續材料選購", 15),
                lesson("室內空氣品質管理", 12),
            ],
        },
    ],
};

static MANAGEMENT_NOVICE_PATH: LearningPath = LearningPath {
    title: "📊 管理入門者學習路徑",
    description: "建立碳管理基礎，踏入永續職涯",
    modules: &[
        Module {
            id: "beginner-basics",
            title: "碳管理基礎概念",
            description: "永續管理的入門知識",
            lessons: &[
                lesson("溫室氣體與碳排放基礎", 12),
                lesson("碳管理術語入門", 10),
                lesson("企業碳盤查概述", 15),
                lesson("Scope 1/2/3 排放介紹", 18),
            ],
        },
        Module {
            id: "beginner-career",
            title: "永續職涯發展",
            description: "進入永續領域的職涯準備",
            lessons: &[
                lesson("永續人才市場趨勢", 15),
                lesson("ISO 14064 標準入門", 20),
                lesson("永續相關證照介紹", 18),
            ],
        },
    ],
};

static CONSCIOUS_CONSUMER_PATH: LearningPath = LearningPath {
    title: "🛒 自覺消費者學習路徑",
    description: "成為負責任的消費者，用消費力量改變世界",
    modules: &[
        Module {
            id: "consumer-choice",
            title: "綠色消費選擇",
            description: "如何辨識與選擇環保產品",
            lessons: &[
                lesson("認識環保標章與認證", 15),
                lesson("如何辨識漂綠行銷", 18),
                lesson("低碳產品選購指南", 20),
                lesson("永續時尚與衣物選擇", 15),
            ],
        },
        Module {
            id: "consumer-impact",
            title: "消費者影響力",
            description: "用消費推動企業改變",
            lessons: &[
                lesson("消費者運動與企業責任", 18),
                lesson("社會企業與 B 型企業", 15),
                lesson("投資與消費的永續選擇", 20),
            ],
        },
    ],
};

static ENGINEERING_MATERIAL: LearningPath = LearningPath {
    title: "🔧 工程學群專屬教材",
    description: "永續工程設計原則與實務",
    modules: &[Module {
        id: "green-engineering",
        title: "綠色工程設計",
        description: "永續工程設計原則與實務",
        lessons: &[
            lesson("生命週期評估 (LCA)", 20),
            lesson("綠色製程設計", 18),
            lesson("節能減排技術", 22),
            lesson("循環經濟在工程的應用", 25),
        ],
    }],
};

static MANAGEMENT_MATERIAL: LearningPath = LearningPath {
    title: "📊 管理學群專屬教材",
    description: "企業永續發展策略與實踐",
    modules: &[Module {
        id: "sustainable-business",
        title: "永續經營管理",
        description: "企業永續發展策略與實踐",
        lessons: &[
            lesson("綠色供應鏈管理", 20),
            lesson("ESG 投資趨勢", 15),
            lesson("碳資產管理", 18),
            lesson("永續績效指標 (KPI)", 22),
        ],
    }],
};

static GENERAL_MATERIAL: LearningPath = LearningPath {
    title: "📚 通識永續教材",
    description: "跨領域的永續發展知識",
    modules: &[Module {
        id: "general-sustainability",
        title: "永續發展通識",
        description: "跨領域的永續發展知識",
        lessons: &[
            lesson("聯合國 SDGs 介紹", 15),
            lesson("全球永續趨勢", 12),
            lesson("個人永續行動方案", 10),
        ],
    }],
};

pub struct CurriculumService;

impl CurriculumService {
    pub fn persona_path(persona: Persona) -> &'static LearningPath {
        match persona {
            Persona::Leader => &LEADER_PATH,
            Persona::Researcher => &RESEARCHER_PATH,
            Persona::PolicyAnalyst => &POLICY_ANALYST_PATH,
            Persona::TechEnthusiast => &TECH_ENTHUSIAST_PATH,
            Persona::Activist => &ACTIVIST_PATH,
            Persona::GreenLifestyler => &GREEN_LIFESTYLER_PATH,
            Persona::ManagementNovice => &MANAGEMENT_NOVICE_PATH,
            Persona::ConsciousConsumer => &CONSCIOUS_CONSUMER_PATH,
        }
    }

    /// Colleges without their own material, or no college at all, get the
    /// general one.
    pub fn college_material(college: Option<College>) -> &'static LearningPath {
        match college {
            Some(College::Engineering) => &ENGINEERING_MATERIAL,
            Some(College::Management) => &MANAGEMENT_MATERIAL,
            _ => &GENERAL_MATERIAL,
        }
    }

    pub fn catalogue_for(persona: Persona, college: Option<College>) -> Catalogue {
        Catalogue {
            common: &COMMON_MODULES,
            persona: Self::persona_path(persona),
            college: Self::college_material(college),
        }
    }
}

/// One graded question: id, optional prompt shown to the learner, correct choice.
#[derive(Debug, Clone, Copy)]
pub struct AnswerKey {
    pub question_id: &'static str,
    pub prompt: Option<&'static str>,
    pub options: &'static [&'static str],
    pub correct: &'static str,
}

const fn key(question_id: &'static str, correct: &'static str) -> AnswerKey {
    AnswerKey {
        question_id,
        prompt: None,
        options: &[],
        correct,
    }
}

pub static KNOWLEDGE_KEYS: [AnswerKey; 3] = [key("q3", "B"), key("q4", "C"), key("q5", "B")];

static ENGINEERING_KEYS: [AnswerKey; 3] = [
    key("q-工程-1", "C"),
    key("q-工程-2", "B"),
    key("q-工程-3", "B"),
];
static MANAGEMENT_KEYS: [AnswerKey; 3] = [
    key("q-管理-4", "B"),
    key("q-管理-5", "B"),
    key("q-管理-6", "C"),
];
static SCIENCE_KEYS: [AnswerKey; 3] = [
    key("q-科學-8", "C"),
    key("q-科學-9", "B"),
    key("q-科學-10", "C"),
];
static SOCIAL_SCIENCE_KEYS: [AnswerKey; 3] = [
    key("q-社科-11", "B"),
    key("q-社科-12", "B"),
    key("q-社科-13", "A"),
];
static HUMANITIES_KEYS: [AnswerKey; 3] = [
    key("q-人文-14", "B"),
    key("q-人文-15", "B"),
    key("q-人文-16", "B"),
];
static MEDICINE_KEYS: [AnswerKey; 3] = [
    key("q-醫學-17", "B"),
    key("q-醫學-18", "C"),
    key("q-醫學-19", "D"),
];

/// Keys for the advanced quiz the given college sits.
pub fn college_keys(college: College) -> &'static [AnswerKey] {
    match college.quiz_college() {
        College::Engineering | College::Other => &ENGINEERING_KEYS,
        College::Management => &MANAGEMENT_KEYS,
        College::Science => &SCIENCE_KEYS,
        College::SocialScience => &SOCIAL_SCIENCE_KEYS,
        College::Humanities => &HUMANITIES_KEYS,
        College::Medicine => &MEDICINE_KEYS,
    }
}

pub static POST_QUIZ_KEYS: [AnswerKey; 5] = [
    AnswerKey {
        question_id: "post_q1",
        prompt: Some("1. 根據 GHG Protocol，企業的直接排放（如工廠燃燒化石燃料）屬於哪個範疇？"),
        options: &["範疇一 (Scope 1)", "範疇二 (Scope 2)", "範疇三 (Scope 3)", "不確定"],
        correct: "A",
    },
    AnswerKey {
        question_id: "post_q2",
        prompt: Some("2. 下列哪項措施對減少個人碳足跡最有效？"),
        options: &["購買碳權抵銷", "減少肉類攝取並選擇大眾運輸", "使用塑膠袋", "增加汽車使用頻率"],
        correct: "B",
    },
    AnswerKey {
        question_id: "post_q3",
        prompt: Some("3. 台灣的「2050 淨零排放」目標意味著什麼？"),
        options: &["完全不排放任何溫室氣體", "排放量與移除量達到平衡", "只減少 50% 的排放", "不清楚"],
        correct: "B",
    },
    AnswerKey {
        question_id: "post_q4",
        prompt: Some("4. ESG 中的 \"E\" 代表什麼？"),
        options: &["Economic (經濟)", "Environmental (環境)", "Efficiency (效率)", "Energy (能源)"],
        correct: "B",
    },
    AnswerKey {
        question_id: "post_q5",
        prompt: Some("5. 碳定價機制的主要目的是什麼？"),
        options: &["增加政府收入", "讓碳排放產生經濟成本，促進減排", "限制企業發展", "不確定"],
        correct: "B",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_persona_has_two_modules() {
        for persona in Persona::ALL {
            let path = CurriculumService::persona_path(persona);
            assert_eq!(path.modules.len(), 2, "{persona}");
            assert!(path.title.contains(persona.label()));
        }
    }

    #[test]
    fn colleges_without_material_fall_back_to_general() {
        assert_eq!(
            CurriculumService::college_material(Some(College::Engineering)).modules[0].id,
            "green-engineering"
        );
        assert_eq!(
            CurriculumService::college_material(Some(College::Management)).modules[0].id,
            "sustainable-business"
        );
        for college in [College::Humanities, College::Medicine, College::Other] {
            assert_eq!(
                CurriculumService::college_material(Some(college)).modules[0].id,
                "general-sustainability"
            );
        }
        assert_eq!(
            CurriculumService::college_material(None).modules[0].id,
            "general-sustainability"
        );
    }

    #[test]
    fn catalogue_lookup_matches_module_and_lesson_together() {
        let catalogue =
            CurriculumService::catalogue_for(Persona::ManagementNovice, Some(College::Management));
        assert!(catalogue.contains("carbon-basics", "溫室效應原理"));
        assert!(catalogue.contains("beginner-career", "ISO 14064 標準入門"));
        assert!(catalogue.contains("sustainable-business", "碳資產管理"));
        // right lesson, wrong module
        assert!(!catalogue.contains("climate-change", "溫室效應原理"));
        // another persona's module
        assert!(!catalogue.contains("leadership-strategy", "永續領導力培養"));
        assert_eq!(catalogue.modules().count(), 5);
    }

    #[test]
    fn other_college_uses_engineering_quiz_keys() {
        assert_eq!(college_keys(College::Other)[0].question_id, "q-工程-1");
        for college in College::ALL {
            let keys = college_keys(college);
            assert_eq!(keys.len(), 3);
            let prefix = format!("q-{}", college.quiz_college().label());
            assert!(keys.iter().all(|k| k.question_id.starts_with(&prefix)));
        }
    }

    #[test]
    fn post_quiz_has_five_prompted_questions() {
        assert_eq!(POST_QUIZ_KEYS.len(), 5);
        assert!(POST_QUIZ_KEYS.iter().all(|k| k.prompt.is_some() && k.options.len() == 4));
    }
}
