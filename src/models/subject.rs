/// 课程层级枚举
///
/// 对应文档站 URL 中的层级路径段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Level {
    /// 剑桥 IGCSE
    #[serde(rename = "cambridge-igcse")]
    Igcse,
    /// 剑桥国际 AS & A Level
    #[serde(rename = "cambridge-international-a-level")]
    ALevel,
}

impl Level {
    /// 获取 URL 路径段
    pub fn path_segment(self) -> &'static str {
        match self {
            Level::Igcse => "cambridge-igcse",
            Level::ALevel => "cambridge-international-a-level",
        }
    }

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Level::Igcse => "IGCSE",
            Level::ALevel => "AS & A Level",
        }
    }

    /// 从路径段解析层级
    pub fn from_path_segment(s: &str) -> Option<Self> {
        match s {
            "cambridge-igcse" => Some(Level::Igcse),
            "cambridge-international-a-level" => Some(Level::ALevel),
            _ => None,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 科目映射条目
///
/// 持久化格式为以科目代码为键的 JSON 对象：
/// `{ "0625": { "slug": "physics-0625", "level": "cambridge-igcse" } }`
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubjectEntry {
    /// URL 路径中的科目标识（如 `physics-0625`）
    pub slug: String,
    /// 课程层级
    pub level: Level,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_serde_roundtrip() {
        let entry = SubjectEntry {
            slug: "physics-0625".to_string(),
            level: Level::Igcse,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("cambridge-igcse"));

        let back: SubjectEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_level_path_segment() {
        assert_eq!(Level::Igcse.path_segment(), "cambridge-igcse");
        assert_eq!(
            Level::ALevel.path_segment(),
            "cambridge-international-a-level"
        );
        assert_eq!(
            Level::from_path_segment("cambridge-igcse"),
            Some(Level::Igcse)
        );
        assert_eq!(Level::from_path_segment("unknown"), None);
    }
}
