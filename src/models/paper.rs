use crate::error::{AppResult, RequestError};

/// 考试季枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Session {
    /// 2/3 月考试季
    FebMarch,
    /// 5/6 月考试季
    MayJune,
    /// 10/11 月考试季
    OctNov,
}

impl Session {
    /// 获取文件名中的考试季字母
    pub fn letter(self) -> char {
        match self {
            Session::FebMarch => 'm',
            Session::MayJune => 's',
            Session::OctNov => 'w',
        }
    }

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Session::FebMarch => "Feb/March",
            Session::MayJune => "May/June",
            Session::OctNov => "Oct/Nov",
        }
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 文档类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DocType {
    /// 试题卷
    QuestionPaper,
    /// 评分标准
    MarkScheme,
    /// 考官报告
    ExaminerReport,
}

impl DocType {
    /// 获取文件名中的类型标记
    pub fn token(self) -> &'static str {
        match self {
            DocType::QuestionPaper => "qp",
            DocType::MarkScheme => "ms",
            DocType::ExaminerReport => "er",
        }
    }

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            DocType::QuestionPaper => "Question Papers",
            DocType::MarkScheme => "Mark Schemes",
            DocType::ExaminerReport => "Examiner Reports",
        }
    }

    /// 尝试从标记解析文档类型（精确匹配）
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "qp" => Some(DocType::QuestionPaper),
            "ms" => Some(DocType::MarkScheme),
            "er" => Some(DocType::ExaminerReport),
            _ => None,
        }
    }

    /// 智能查找文档类型（支持表单显示名等模糊匹配）
    pub fn find(s: &str) -> Option<Self> {
        // 先尝试精确匹配
        if let Some(doc_type) = Self::from_token(s) {
            return Some(doc_type);
        }

        // 模糊匹配表单标签
        let s_lower = s.to_lowercase();
        if s_lower.contains("question") {
            return Some(DocType::QuestionPaper);
        }
        if s_lower.contains("mark") || s_lower.contains("scheme") {
            return Some(DocType::MarkScheme);
        }
        if s_lower.contains("examiner") || s_lower.contains("report") {
            return Some(DocType::ExaminerReport);
        }

        None
    }
}

impl std::fmt::Display for DocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 单次下载的标识元组
///
/// 不变量：只有考官报告允许 `paper_code` 和 `variant` 同时缺失，
/// 通过 [`PaperQuery::exam_paper`] / [`PaperQuery::examiner_report`]
/// 两个构造函数保证。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperQuery {
    /// 科目代码（3-4 位数字）
    pub subject_code: String,
    /// 试卷代码（考官报告没有）
    pub paper_code: Option<String>,
    /// 两位标准化年份
    pub year: u8,
    /// 卷别数字（考官报告没有）
    pub variant: Option<char>,
    /// 考试季
    pub session: Session,
    /// 文档类型
    pub doc_type: DocType,
}

impl PaperQuery {
    /// 构造试题卷 / 评分标准的标识元组
    pub fn exam_paper(
        subject_code: impl Into<String>,
        paper_code: impl Into<String>,
        year: u8,
        variant: char,
        session: Session,
        doc_type: DocType,
    ) -> Self {
        Self {
            subject_code: subject_code.into(),
            paper_code: Some(paper_code.into()),
            year,
            variant: Some(variant),
            session,
            doc_type,
        }
    }

    /// 构造考官报告的标识元组（没有试卷代码和卷别）
    pub fn examiner_report(subject_code: impl Into<String>, year: u8, session: Session) -> Self {
        Self {
            subject_code: subject_code.into(),
            paper_code: None,
            year,
            variant: None,
            session,
            doc_type: DocType::ExaminerReport,
        }
    }

    /// 获取两位年份字符串（如 `23`）
    pub fn year_two_digit(&self) -> String {
        format!("{:02}", self.year)
    }

    /// 获取四位年份字符串（如 `2023`）
    pub fn year_full(&self) -> String {
        format!("20{:02}", self.year)
    }
}

impl std::fmt::Display for PaperQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}{}",
            self.subject_code,
            self.doc_type.token(),
            self.session.letter(),
            self.year_two_digit()
        )?;
        if let Some(pc) = &self.paper_code {
            write!(f, " 卷 {}", pc)?;
            if let Some(v) = self.variant {
                write!(f, "{}", v)?;
            }
        }
        Ok(())
    }
}

/// 将 2 位或 4 位年份字符串标准化为两位年份
///
/// 4 位年份取后两位（`2023` -> `23`），与文件名约定保持一致。
pub fn two_digit_year(input: &str) -> AppResult<u8> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(RequestError::InvalidYear {
            value: input.to_string(),
        }
        .into());
    }

    let last_two = if trimmed.len() > 2 {
        &trimmed[trimmed.len() - 2..]
    } else {
        trimmed
    };

    last_two.parse::<u8>().map_err(|_| {
        RequestError::InvalidYear {
            value: input.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_letters() {
        assert_eq!(Session::FebMarch.letter(), 'm');
        assert_eq!(Session::MayJune.letter(), 's');
        assert_eq!(Session::OctNov.letter(), 'w');
    }

    #[test]
    fn test_doc_type_find() {
        // 精确标记
        assert_eq!(DocType::find("qp"), Some(DocType::QuestionPaper));
        assert_eq!(DocType::find("ms"), Some(DocType::MarkScheme));
        assert_eq!(DocType::find("er"), Some(DocType::ExaminerReport));

        // 表单显示名
        assert_eq!(
            DocType::find("Question Papers"),
            Some(DocType::QuestionPaper)
        );
        assert_eq!(DocType::find("Mark Schemes"), Some(DocType::MarkScheme));
        assert_eq!(
            DocType::find("Examiner Reports"),
            Some(DocType::ExaminerReport)
        );

        assert_eq!(DocType::find("unknown"), None);
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(two_digit_year("23").unwrap(), 23);
        assert_eq!(two_digit_year("2023").unwrap(), 23);
        assert_eq!(two_digit_year("09").unwrap(), 9);
        assert_eq!(two_digit_year(" 2025 ").unwrap(), 25);

        assert!(two_digit_year("").is_err());
        assert!(two_digit_year("20xy").is_err());
    }

    #[test]
    fn test_year_full() {
        let query = PaperQuery::examiner_report("0625", 9, Session::MayJune);
        assert_eq!(query.year_two_digit(), "09");
        assert_eq!(query.year_full(), "2009");
    }

    #[test]
    fn test_examiner_report_has_no_paper_code() {
        let query = PaperQuery::examiner_report("0625", 23, Session::OctNov);
        assert!(query.paper_code.is_none());
        assert!(query.variant.is_none());
        assert_eq!(query.doc_type, DocType::ExaminerReport);
    }
}
