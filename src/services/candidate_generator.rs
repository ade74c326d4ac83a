//! 候选文件名生成 - 业务能力层
//!
//! 文档站的文件命名约定随年代和试卷类型变化，且没有任何查询接口，
//! 只能按约定流行程度依次猜测。本模块把这些经验约定编码为固定
//! 顺序的模板列表：列表顺序就是探测优先级，运行期不会重排。
//! 新发现的约定按优先级插入对应位置即可，去重保证重叠无副作用。

use crate::models::PaperQuery;
use std::collections::HashSet;

/// 生成一个标识元组的全部候选文件名
///
/// 纯函数：相同输入总是产生相同的有序序列。结果已按首次出现
/// 顺序去重，带试卷代码时最多 10 个候选，不带时最多 5 个。
pub fn generate_candidates(query: &PaperQuery) -> Vec<String> {
    let yy = query.year_two_digit();
    let sc = query.subject_code.as_str();
    let s = query.session.letter();
    let pt = query.doc_type.token();
    let v = query.variant.map(String::from).unwrap_or_default();

    let mut candidates = Vec::new();

    if let Some(pc) = query.paper_code.as_deref() {
        // 试题卷 / 评分标准的常见命名
        candidates.push(format!("{sc}_{s}{yy}_{pt}_{pc}{v}.pdf"));
        candidates.push(format!("{sc}_{s}{yy}_{pt}_{pc}.pdf"));
        candidates.push(format!("{sc}_{s}{yy}_{pt}{v}_{pc}.pdf"));
        candidates.push(format!("{sc}_{s}{yy}_{pt}{v}{pc}.pdf"));
        // 连字符命名的季节标记固定为 s，为站点实际行为
        candidates.push(format!("{sc}-s{yy}-{pt}-{pc}{v}.pdf"));
        candidates.push(format!("{sc}-s{yy}-{pt}-{pc}.pdf"));
        candidates.push(format!("{sc}-s{yy}-{pc}-{pt}{v}.pdf"));
        candidates.push(format!("{sc}-s{yy}-{pc}-{pt}.pdf"));
        candidates.push(format!("{sc}_{yy}_{pt}_{pc}{v}.pdf"));
        candidates.push(format!("{sc}{yy}_{pt}_{pc}{v}.pdf"));
    } else {
        // 考官报告等没有试卷代码的文件
        candidates.push(format!("{sc}_{s}{yy}_{pt}{v}.pdf"));
        candidates.push(format!("{sc}_{s}{yy}_{pt}.pdf"));
        candidates.push(format!("{sc}-s{yy}-{pt}{v}.pdf"));
        candidates.push(format!("{sc}-s{yy}-{pt}.pdf"));
        candidates.push(format!("{sc}_{yy}_{pt}.pdf"));
    }

    // 保序去重
    let mut seen = HashSet::new();
    candidates.retain(|c| seen.insert(c.clone()));
    candidates
}
