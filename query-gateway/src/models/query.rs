use serde::{Deserialize, Serialize};

/// Path of the gateway endpoint, relative to the gateway origin.
pub const QUERY_PATH: &str = "/api/query";

/// The only error text a caller of the gateway ever sees.
pub const FAILURE_MESSAGE: &str = "Failed to process request";

/// Body accepted by the gateway and forwarded verbatim to the inference service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// URI of the document the questions are about.
    pub documents: String,

    /// Questions in asking order. The chat client always sends exactly one.
    pub questions: Vec<String>,
}

impl QueryRequest {
    pub fn single(documents: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            documents: documents.into(),
            questions: vec![question.into()],
        }
    }
}

/// Uniform failure body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn failure() -> Self {
        Self {
            error: FAILURE_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_question_wire_shape() {
        let request = QueryRequest::single("https://x/policy.pdf", "What is the waiting period?");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "documents": "https://x/policy.pdf",
                "questions": ["What is the waiting period?"]
            })
        );
    }

    #[test]
    fn empty_fields_still_decode() {
        let request: QueryRequest =
            serde_json::from_value(json!({ "documents": "", "questions": [] })).unwrap();
        assert!(request.documents.is_empty());
        assert!(request.questions.is_empty());
    }

    #[test]
    fn multiple_questions_keep_their_order() {
        let request: QueryRequest = serde_json::from_value(json!({
            "documents": "https://x/policy.pdf",
            "questions": ["a", "b"]
        }))
        .unwrap();
        assert_eq!(request.questions, ["a", "b"]);
    }

    #[test]
    fn failure_body_is_fixed() {
        assert_eq!(
            serde_json::to_string(&ErrorBody::failure()).unwrap(),
            r#"{"error":"Failed to process request"}"#
        );
    }
}
