use crate::error::{AppResult, RequestError};
use crate::models::paper::{two_digit_year, DocType, Session};

/// 表单输入契约
///
/// 外部表单收集的原始参数，字段保持原始字符串形式，
/// 由 [`DownloadRequest::validate`] 统一校验并标准化。
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    /// 科目代码列表（逗号分隔）
    pub subject_codes: String,
    /// 试卷代码列表（逗号分隔，可为多位数字；考官报告不需要）
    pub paper_code: String,
    /// 起始年份（2 位或 4 位）
    pub start_year: String,
    /// 结束年份（2 位或 4 位）
    pub end_year: String,
    /// 文档类型（标记或表单显示名）
    pub doc_type: String,
    /// 是否下载 2/3 月考试季
    pub feb_march: bool,
    /// 是否下载 5/6 月考试季
    pub may_june: bool,
    /// 是否下载 10/11 月考试季
    pub oct_nov: bool,
    /// 清理选项：删除空白页（仅接受，核心不实现）
    pub remove_blanks: bool,
    /// 清理选项：删除附加材料页（仅接受，核心不实现）
    pub remove_additional: bool,
    /// 清理选项：删除公式页（仅接受，核心不实现）
    pub remove_formulae: bool,
}

impl Default for DownloadRequest {
    fn default() -> Self {
        Self {
            subject_codes: "0625".to_string(),
            paper_code: "2".to_string(),
            start_year: "23".to_string(),
            end_year: "25".to_string(),
            doc_type: "Question Papers".to_string(),
            feb_march: true,
            may_june: true,
            oct_nov: true,
            remove_blanks: false,
            remove_additional: false,
            remove_formulae: false,
        }
    }
}

impl DownloadRequest {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            subject_codes: std::env::var("SUBJECT_CODES").unwrap_or(default.subject_codes),
            paper_code: std::env::var("PAPER_CODE").unwrap_or(default.paper_code),
            start_year: std::env::var("START_YEAR").unwrap_or(default.start_year),
            end_year: std::env::var("END_YEAR").unwrap_or(default.end_year),
            doc_type: std::env::var("DOC_TYPE").unwrap_or(default.doc_type),
            feb_march: std::env::var("FEB_MARCH").ok().and_then(|v| v.parse().ok()).unwrap_or(default.feb_march),
            may_june: std::env::var("MAY_JUNE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.may_june),
            oct_nov: std::env::var("OCT_NOV").ok().and_then(|v| v.parse().ok()).unwrap_or(default.oct_nov),
            remove_blanks: std::env::var("REMOVE_BLANKS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.remove_blanks),
            remove_additional: std::env::var("REMOVE_ADDITIONAL").ok().and_then(|v| v.parse().ok()).unwrap_or(default.remove_additional),
            remove_formulae: std::env::var("REMOVE_FORMULAE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.remove_formulae),
        }
    }

    /// 校验并标准化表单输入
    ///
    /// 规则：
    /// - 科目代码列表去除空白后不能为空
    /// - 年份标准化为两位形式，且结束年份不能小于起始年份
    /// - 至少启用一个考试季
    /// - 试题卷 / 评分标准需要至少一个试卷代码
    pub fn validate(&self) -> AppResult<ValidatedRequest> {
        let subject_codes = split_code_list(&self.subject_codes);
        if subject_codes.is_empty() {
            return Err(RequestError::EmptySubjectCodes.into());
        }

        let doc_type =
            DocType::find(&self.doc_type).ok_or_else(|| RequestError::UnknownDocType {
                value: self.doc_type.clone(),
            })?;

        let paper_codes = if doc_type == DocType::ExaminerReport {
            Vec::new()
        } else {
            let codes = split_code_list(&self.paper_code);
            if codes.is_empty() {
                return Err(RequestError::EmptyPaperCodes.into());
            }
            codes
        };

        let start_year = two_digit_year(&self.start_year)?;
        let end_year = two_digit_year(&self.end_year)?;
        if end_year < start_year {
            return Err(RequestError::YearRangeInverted {
                start: start_year,
                end: end_year,
            }
            .into());
        }

        if !self.feb_march && !self.may_june && !self.oct_nov {
            return Err(RequestError::NoSessionEnabled.into());
        }

        Ok(ValidatedRequest {
            subject_codes,
            paper_codes,
            doc_type,
            start_year,
            end_year,
            feb_march: self.feb_march,
            may_june: self.may_june,
            oct_nov: self.oct_nov,
            remove_blanks: self.remove_blanks,
            remove_additional: self.remove_additional,
            remove_formulae: self.remove_formulae,
        })
    }
}

/// 校验后的下载请求
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub subject_codes: Vec<String>,
    /// 考官报告时为空
    pub paper_codes: Vec<String>,
    pub doc_type: DocType,
    pub start_year: u8,
    pub end_year: u8,
    pub feb_march: bool,
    pub may_june: bool,
    pub oct_nov: bool,
    pub remove_blanks: bool,
    pub remove_additional: bool,
    pub remove_formulae: bool,
}

impl ValidatedRequest {
    /// 获取已启用的考试季列表（固定顺序）
    pub fn enabled_sessions(&self) -> Vec<Session> {
        let mut sessions = Vec::new();
        if self.feb_march {
            sessions.push(Session::FebMarch);
        }
        if self.may_june {
            sessions.push(Session::MayJune);
        }
        if self.oct_nov {
            sessions.push(Session::OctNov);
        }
        sessions
    }

    /// 合并产物的默认文件名（如 `0625_2_23-25.pdf`）
    pub fn output_file_name(&self) -> String {
        format!(
            "{}_{}_{:02}-{:02}.pdf",
            self.subject_codes.join("-"),
            if self.paper_codes.is_empty() {
                "er".to_string()
            } else {
                self.paper_codes.join("-")
            },
            self.start_year,
            self.end_year
        )
    }
}

/// 拆分逗号分隔的代码列表，去除空白项
fn split_code_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
