//! APIレスポンスパーサー
//!
//! Gemini APIのレスポンスを検証し、画像・解説・翻訳テキストを取り出す。
//! 検証の順序はどの呼び出しでも同じ:
//! 1. promptFeedback.blockReason → Blocked
//! 2. 候補なし → NoCandidate
//! 3. finishReasonがSTOP以外 → AbnormalFinish
//! 4. 呼び出しごとの本文チェック

use serde_json::{Map, Value};

use crate::error::{GenerationError, Result, Stage};
use crate::gemini::{Candidate, GenerateContentResponse, FINISH_REASON_STOP};
use crate::types::{DrawingAnalysis, ImagePayload};

/// レスポンス本文からJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の {...} オブジェクト
/// 3. None
///
/// # Examples
/// ```
/// use sketch_ai_common::extract_json;
///
/// let response = "```json\n{\"tips\": \"x\"}\n```";
/// assert_eq!(extract_json(response), Some("{\"tips\": \"x\"}"));
/// ```
pub fn extract_json(response: &str) -> Option<&str> {
    // ```json ... ``` ブロックを探す
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Some(response[start..end].trim());
        }
    }

    // 生の {...} を探す
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    (end >= start).then(|| &response[start..=end])
}

/// 共通の前段チェック（ブロック・候補なし・異常終了）
fn validated_candidate(
    response: &GenerateContentResponse,
    stage: Stage,
) -> Result<&Candidate> {
    if let Some(reason) = response.block_reason() {
        return Err(GenerationError::Blocked {
            stage,
            reason: reason.to_string(),
        });
    }

    let candidate = response
        .candidates
        .first()
        .ok_or(GenerationError::NoCandidate { stage })?;

    match candidate.finish_reason.as_deref() {
        Some(reason) if !reason.is_empty() && reason != FINISH_REASON_STOP => {
            Err(GenerationError::AbnormalFinish {
                stage,
                reason: reason.to_string(),
            })
        }
        _ => Ok(candidate),
    }
}

/// 画像生成レスポンスを検証
///
/// 最初のパートにinlineDataがなければ `MissingImageData`
pub fn parse_image_response(response: &GenerateContentResponse) -> Result<ImagePayload> {
    let candidate = validated_candidate(response, Stage::Image)?;

    candidate
        .content
        .as_ref()
        .and_then(|c| c.parts.first())
        .and_then(|p| p.inline_data.clone())
        .filter(|image| !image.data.is_empty())
        .ok_or(GenerationError::MissingImageData)
}

/// 解説生成レスポンスを検証してDrawingAnalysisを返す
///
/// guidelines / tips のどちらかが欠けている、文字列でない、空白のみの場合は
/// `MalformedAnalysis`
pub fn parse_analysis_response(response: &GenerateContentResponse) -> Result<DrawingAnalysis> {
    validated_candidate(response, Stage::Analysis)?;

    let text = response.text();
    if text.trim().is_empty() {
        return Err(GenerationError::EmptyAnalysis);
    }

    parse_analysis_json(&text)
}

/// 解説JSONをパース
///
/// 本文全体をそのままパースし、失敗した場合のみ `extract_json` で
/// コードブロックや前後の文章を取り除いて再試行する
pub fn parse_analysis_json(text: &str) -> Result<DrawingAnalysis> {
    let value: Value = match serde_json::from_str(text.trim()) {
        Ok(value) => value,
        Err(e) => extract_json(text)
            .and_then(|json_str| serde_json::from_str(json_str.trim()).ok())
            .ok_or_else(|| GenerationError::MalformedAnalysis(format!("invalid JSON ({})", e)))?,
    };

    let Some(map) = value.as_object() else {
        return Err(GenerationError::MalformedAnalysis(
            "expected a JSON object".to_string(),
        ));
    };

    Ok(DrawingAnalysis {
        guidelines: required_string(map, "guidelines")?,
        tips: required_string(map, "tips")?,
    })
}

fn required_string(map: &Map<String, Value>, key: &str) -> Result<String> {
    match map.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(GenerationError::MalformedAnalysis(format!(
            "field '{}' is empty",
            key
        ))),
        Some(_) => Err(GenerationError::MalformedAnalysis(format!(
            "field '{}' is not a string",
            key
        ))),
        None => Err(GenerationError::MalformedAnalysis(format!(
            "missing field '{}'",
            key
        ))),
    }
}

/// 翻訳レスポンスを検証して翻訳文を返す
pub fn parse_translation_response(response: &GenerateContentResponse) -> Result<String> {
    validated_candidate(response, Stage::Translation)?;

    let text = response.text();
    if text.trim().is_empty() {
        return Err(GenerationError::EmptyTranslation);
    }
    Ok(text)
}

/// Data URIを (MIMEタイプ, Base64データ) に分割
///
/// # Arguments
/// * `data_uri` - "data:image/png;base64,iVBORw0..." 形式のData URI
///
/// # Returns
/// 分割結果。base64形式のData URIでなければNone
pub fn split_data_uri(data_uri: &str) -> Option<(&str, &str)> {
    let rest = data_uri.strip_prefix("data:")?;
    let (header, data) = rest.split_once(',')?;
    let mime_type = header.strip_suffix(";base64")?;
    Some((mime_type, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> GenerateContentResponse {
        serde_json::from_value(value).expect("レスポンスのデシリアライズ失敗")
    }

    fn text_response(text: &str, finish_reason: &str) -> GenerateContentResponse {
        response(json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }] },
                "finishReason": finish_reason
            }]
        }))
    }

    // =============================================
    // extract_json テスト
    // =============================================

    #[test]
    fn test_extract_json_with_block() {
        let text = "Here you go:\n```json\n{\"guidelines\": \"a\", \"tips\": \"b\"}\n```\nEnjoy.";
        assert_eq!(extract_json(text), Some(r#"{"guidelines": "a", "tips": "b"}"#));
    }

    #[test]
    fn test_extract_json_raw_object() {
        let text = r#"Result: {"tips": "x"} done"#;
        assert_eq!(extract_json(text), Some(r#"{"tips": "x"}"#));
    }

    #[test]
    fn test_extract_json_none() {
        assert_eq!(extract_json("no json here"), None);
        assert_eq!(extract_json("{not valid json"), None);
        assert_eq!(extract_json(""), None);
    }

    // =============================================
    // parse_image_response テスト
    // =============================================

    #[test]
    fn test_parse_image_response_ok() {
        let resp = response(json!({
            "candidates": [{
                "content": { "parts": [{ "inlineData": { "mimeType": "image/png", "data": "AAA=" } }] },
                "finishReason": "STOP"
            }]
        }));
        let image = parse_image_response(&resp).unwrap();
        assert_eq!(image.to_data_uri(), "data:image/png;base64,AAA=");
    }

    #[test]
    fn test_parse_image_response_blocked() {
        let resp = response(json!({ "promptFeedback": { "blockReason": "SAFETY" } }));
        assert_eq!(
            parse_image_response(&resp),
            Err(GenerationError::Blocked {
                stage: Stage::Image,
                reason: "SAFETY".to_string()
            })
        );
    }

    #[test]
    fn test_parse_image_response_no_candidate() {
        let resp = response(json!({ "candidates": [] }));
        assert_eq!(
            parse_image_response(&resp),
            Err(GenerationError::NoCandidate { stage: Stage::Image })
        );
    }

    #[test]
    fn test_parse_image_response_abnormal_finish() {
        let resp = response(json!({
            "candidates": [{ "content": { "parts": [] }, "finishReason": "IMAGE_SAFETY" }]
        }));
        assert_eq!(
            parse_image_response(&resp),
            Err(GenerationError::AbnormalFinish {
                stage: Stage::Image,
                reason: "IMAGE_SAFETY".to_string()
            })
        );
    }

    #[test]
    fn test_parse_image_response_text_only_is_missing_data() {
        // 正常終了でも最初のパートが画像でなければエラー
        let resp = text_response("I cannot draw that.", "STOP");
        assert_eq!(parse_image_response(&resp), Err(GenerationError::MissingImageData));
    }

    #[test]
    fn test_parse_image_response_image_in_second_part_is_missing_data() {
        let resp = response(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "Here is your sketch" },
                    { "inlineData": { "mimeType": "image/png", "data": "AAA=" } }
                ] },
                "finishReason": "STOP"
            }]
        }));
        assert_eq!(parse_image_response(&resp), Err(GenerationError::MissingImageData));
    }

    #[test]
    fn test_parse_image_response_without_finish_reason() {
        // finishReasonが省略されていれば正常扱い
        let resp = response(json!({
            "candidates": [{
                "content": { "parts": [{ "inlineData": { "mimeType": "image/jpeg", "data": "/9j/" } }] }
            }]
        }));
        assert!(parse_image_response(&resp).is_ok());
    }

    // =============================================
    // parse_analysis_response テスト
    // =============================================

    #[test]
    fn test_parse_analysis_response_ok() {
        let resp = text_response(
            r#"{"guidelines":"* Keep it simple","tips":"**Use** light strokes"}"#,
            "STOP",
        );
        let analysis = parse_analysis_response(&resp).unwrap();
        assert_eq!(analysis.guidelines, "* Keep it simple");
        assert_eq!(analysis.tips, "**Use** light strokes");
    }

    #[test]
    fn test_parse_analysis_response_fenced() {
        let resp = text_response("```json\n{\"guidelines\":\"a\",\"tips\":\"b\"}\n```", "STOP");
        let analysis = parse_analysis_response(&resp).unwrap();
        assert_eq!(analysis.guidelines, "a");
    }

    #[test]
    fn test_parse_analysis_response_empty_with_stop() {
        let resp = text_response("", "STOP");
        assert_eq!(parse_analysis_response(&resp), Err(GenerationError::EmptyAnalysis));
    }

    #[test]
    fn test_parse_analysis_response_empty_with_abnormal_finish() {
        let resp = text_response("", "MAX_TOKENS");
        let err = parse_analysis_response(&resp).unwrap_err();
        assert!(matches!(err, GenerationError::AbnormalFinish { .. }));
        assert!(err.to_string().contains("MAX_TOKENS"));
    }

    #[test]
    fn test_parse_analysis_response_blocked() {
        let resp = response(json!({ "promptFeedback": { "blockReason": "OTHER" } }));
        assert_eq!(
            parse_analysis_response(&resp),
            Err(GenerationError::Blocked {
                stage: Stage::Analysis,
                reason: "OTHER".to_string()
            })
        );
    }

    #[test]
    fn test_parse_analysis_response_invalid_json() {
        let resp = text_response("{not valid json", "STOP");
        assert!(matches!(
            parse_analysis_response(&resp),
            Err(GenerationError::MalformedAnalysis(_))
        ));
    }

    #[test]
    fn test_parse_analysis_json_missing_field() {
        let err = parse_analysis_json(r#"{"guidelines":"a"}"#).unwrap_err();
        assert_eq!(err, GenerationError::MalformedAnalysis("missing field 'tips'".into()));
    }

    #[test]
    fn test_parse_analysis_json_blank_field() {
        let err = parse_analysis_json(r#"{"guidelines":"a","tips":"  "}"#).unwrap_err();
        assert_eq!(err, GenerationError::MalformedAnalysis("field 'tips' is empty".into()));
    }

    #[test]
    fn test_parse_analysis_json_non_string_field() {
        let err = parse_analysis_json(r#"{"guidelines":["a"],"tips":"b"}"#).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedAnalysis(_)));
    }

    #[test]
    fn test_parse_analysis_json_fence_inside_field() {
        let text = r#"{"guidelines":"* Use a code block like ```json\n{\"a\":1}\n``` to plan","tips":"* ok"}"#;
        let analysis = parse_analysis_json(text).unwrap();

        assert_eq!(analysis.guidelines, "* Use a code block like ```json\n{\"a\":1}\n``` to plan");
        assert_eq!(analysis.tips, "* ok");
    }

    #[test]
    fn test_parse_analysis_json_fenced_body() {
        let text = "Here you go:\n```json\n{\"guidelines\":\"a\",\"tips\":\"b\"}\n```";
        let analysis = parse_analysis_json(text).unwrap();
        assert_eq!(analysis.guidelines, "a");
        assert_eq!(analysis.tips, "b");
    }

    #[test]
    fn test_parse_analysis_json_array() {
        let err = parse_analysis_json(r#"[{"guidelines":"a","tips":"b"}]"#).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedAnalysis(_)));
    }

    // =============================================
    // parse_translation_response テスト
    // =============================================

    #[test]
    fn test_parse_translation_response() {
        let resp = text_response("* Reste simple", "STOP");
        assert_eq!(parse_translation_response(&resp).unwrap(), "* Reste simple");
    }

    #[test]
    fn test_parse_translation_response_empty() {
        let resp = text_response("", "STOP");
        assert_eq!(
            parse_translation_response(&resp),
            Err(GenerationError::EmptyTranslation)
        );
    }

    // =============================================
    // split_data_uri テスト
    // =============================================

    #[test]
    fn test_split_data_uri_png() {
        assert_eq!(
            split_data_uri("data:image/png;base64,iVBORw0KGgo="),
            Some(("image/png", "iVBORw0KGgo="))
        );
    }

    #[test]
    fn test_split_data_uri_invalid() {
        assert_eq!(split_data_uri("not a data uri"), None);
        assert_eq!(split_data_uri("data:image/png,raw"), None);
        assert_eq!(split_data_uri(""), None);
    }
}
