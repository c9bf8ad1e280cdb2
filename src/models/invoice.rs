use serde::{Deserialize, Serialize};

/// 发票明细项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub id: String,
    pub name: String,
    pub quantity: String,
    pub price: String,
}

/// 发票数据
///
/// 所有标量字段均为字符串，保留模型返回的原始格式 (金额不做数值转换)。
/// 组装完成后每个字段都有值，缺失字段补空串，绝不输出 null。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceData {
    pub id: String,
    pub invoice_number: String,
    pub invoice_code: String,
    /// 开票日期，可推导时为 YYYY-MM-DD，否则保留原文
    pub date: String,
    /// 不含税金额
    pub amount: String,
    /// 税额
    pub tax_amount: String,
    /// 价税合计
    pub total_amount: String,
    pub seller: String,
    pub seller_tax_id: String,
    pub buyer: String,
    pub buyer_tax_id: String,
    pub remarks: String,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
}
