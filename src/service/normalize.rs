//! 模型回复的解析修复与发票组装
//!
//! 模型回复常见的偏差：markdown 围栏、JSON 前后夹杂说明文字、
//! 字段缺失、数字没加引号、items 不是数组。这里把这些偏差
//! 逐一修复成统一的字段表，再组装成 InvoiceData。

use crate::error::RecognitionError;
use crate::models::{InvoiceData, InvoiceItem};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use uuid::Uuid;

/// YYYY-M-D / YYYY/M/D 形状的日期片段 (月日允许 1-2 位)
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})[-/](\d{1,2})[-/](\d{1,2})").expect("valid regex"));

/// 模型必须返回的 12 个字段
const REQUIRED_FIELDS: [&str; 12] = [
    "invoiceNumber",
    "invoiceCode",
    "date",
    "amount",
    "taxAmount",
    "totalAmount",
    "seller",
    "sellerTaxId",
    "buyer",
    "buyerTaxId",
    "remarks",
    "items",
];

/// 从模型的自由文本回复里提取并修复出字段表
pub fn parse_model_reply(raw: &str) -> Result<Map<String, Value>, RecognitionError> {
    // 围栏标记可能出现在文本任意位置，全部移除
    let content = raw.trim().replace("```json", "").replace("```", "");
    let content = content.trim();

    // 贪婪截取第一个 { 到最后一个 } 的片段，容忍 JSON 前后的说明文字
    let candidate = match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => content,
    };

    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| RecognitionError::Malformed(format!("JSON 解析错误: {}", e)))?;

    let Value::Object(mut map) = value else {
        return Err(RecognitionError::Malformed(
            "解析结果不是键值对象".to_string(),
        ));
    };

    // 补齐缺失字段：标量补空串，items 补空数组
    for field in REQUIRED_FIELDS {
        if !map.contains_key(field) {
            let default = if field == "items" {
                Value::Array(Vec::new())
            } else {
                Value::String(String::new())
            };
            map.insert(field.to_string(), default);
        }
    }

    // items 存在但不是数组时重置为空数组
    if !map.get("items").map(Value::is_array).unwrap_or(false) {
        map.insert("items".to_string(), Value::Array(Vec::new()));
    }

    Ok(map)
}

/// 组装发票记录：生成标识、清理字段、规范日期
pub fn build_invoice(map: &Map<String, Value>) -> InvoiceData {
    let items = map
        .get("items")
        .and_then(Value::as_array)
        .map(|array| {
            array
                .iter()
                // 不是键值对象的明细直接丢弃
                .filter_map(Value::as_object)
                .map(|item| InvoiceItem {
                    id: Uuid::new_v4().to_string(),
                    name: text_field(item, "name"),
                    quantity: text_field(item, "quantity"),
                    price: text_field(item, "price"),
                })
                .collect()
        })
        .unwrap_or_default();

    InvoiceData {
        id: Uuid::new_v4().to_string(),
        invoice_number: text_field(map, "invoiceNumber"),
        invoice_code: text_field(map, "invoiceCode"),
        date: normalize_date(&text_field(map, "date")),
        amount: text_field(map, "amount"),
        tax_amount: text_field(map, "taxAmount"),
        total_amount: text_field(map, "totalAmount"),
        seller: text_field(map, "seller"),
        seller_tax_id: text_field(map, "sellerTaxId"),
        buyer: text_field(map, "buyer"),
        buyer_tax_id: text_field(map, "buyerTaxId"),
        remarks: text_field(map, "remarks"),
        items,
    }
}

/// 取字段为修剪后的文本；缺失或 null 为空串，未加引号的数字保留
/// 其 JSON 字面量形式
fn text_field(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// 规范日期：找到日期形状的片段则补零重排为 YYYY-MM-DD，
/// 找不到时原样返回修剪后的文本，由下游自行容错
fn normalize_date(raw: &str) -> String {
    let trimmed = raw.trim();
    match DATE_RE.captures(trimmed) {
        Some(caps) => format!("{}-{:0>2}-{:0>2}", &caps[1], &caps[2], &caps[3]),
        None => trimmed.to_string(),
    }
}
