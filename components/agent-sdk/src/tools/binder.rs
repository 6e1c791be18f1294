//! Positional argument binding with type coercion.

use crate::error::BindError;
use crate::tools::catalog::ToolCatalog;
use crate::tools::descriptor::{BoundArguments, ParamType, ToolDescriptor};
use crate::tools::parser::FunctionCall;
use serde_json::{Number, Value};

/// Binds `FUNCTION_CALL` tokens onto a tool's declared parameters.
///
/// The i-th token always binds to the i-th declared parameter. Binding is
/// all-or-nothing: the first token that fails to coerce aborts the whole call.
pub struct ArgumentBinder;

impl ArgumentBinder {
    /// Resolves the requested tool in `catalog` and binds the call's arguments.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::UnknownTool`] when no callable tool has the exact
    /// name, [`BindError::ArityMismatch`] when the token count differs from the
    /// declared parameter count, and [`BindError::TypeCoercion`] when a token
    /// does not parse as its declared type.
    pub fn bind<'c>(
        call: &FunctionCall,
        catalog: &'c ToolCatalog,
    ) -> Result<(&'c ToolDescriptor, BoundArguments), BindError> {
        let descriptor = catalog
            .get(&call.name)
            .ok_or_else(|| BindError::UnknownTool {
                name: call.name.clone(),
            })?;
        let arguments = Self::bind_to(call, descriptor)?;
        Ok((descriptor, arguments))
    }

    /// Binds the call's arguments against an already-resolved descriptor.
    ///
    /// # Errors
    ///
    /// Same as [`bind`](Self::bind), minus tool resolution.
    pub fn bind_to(
        call: &FunctionCall,
        descriptor: &ToolDescriptor,
    ) -> Result<BoundArguments, BindError> {
        if call.arguments.len() != descriptor.arity() {
            return Err(BindError::ArityMismatch {
                tool: descriptor.name.clone(),
                expected: descriptor.arity(),
                actual: call.arguments.len(),
                parameters: descriptor.parameter_names(),
            });
        }

        let mut bound = BoundArguments::new();
        for (parameter, token) in descriptor.parameters.iter().zip(&call.arguments) {
            let value = coerce(token, parameter.kind).ok_or_else(|| BindError::TypeCoercion {
                parameter: parameter.name.clone(),
                value: token.clone(),
                expected: parameter.kind,
            })?;
            bound.insert(parameter.name.clone(), value);
        }
        Ok(bound)
    }
}

fn coerce(token: &str, kind: ParamType) -> Option<Value> {
    match kind {
        ParamType::String => Some(Value::String(token.to_string())),
        ParamType::Integer => token.parse::<i64>().ok().map(Value::from),
        ParamType::Number => token
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
        ParamType::Boolean => {
            if token.eq_ignore_ascii_case("true") {
                Some(Value::Bool(true))
            } else if token.eq_ignore_ascii_case("false") {
                Some(Value::Bool(false))
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::descriptor::ToolSpec;
    use serde_json::json;

    fn call(name: &str, args: &[&str]) -> FunctionCall {
        FunctionCall {
            name: name.to_string(),
            arguments: args.iter().map(ToString::to_string).collect(),
        }
    }

    fn catalog() -> ToolCatalog {
        ToolCatalog::from_specs([
            ToolSpec::with_properties(
                "send_email",
                "Sends an email message.",
                [
                    ("to", ParamType::String),
                    ("subject", ParamType::String),
                    ("body", ParamType::String),
                ],
            ),
            ToolSpec::with_properties(
                "draw_rectangle",
                "Draws a rectangle.",
                [
                    ("x", ParamType::Integer),
                    ("y", ParamType::Integer),
                    ("width", ParamType::Integer),
                    ("height", ParamType::Integer),
                ],
            ),
            ToolSpec::with_properties(
                "configure",
                "Mixed types.",
                [("ratio", ParamType::Number), ("enabled", ParamType::Boolean)],
            ),
        ])
    }

    #[test]
    fn test_binds_send_email_positionally() {
        let catalog = catalog();
        let (tool, args) =
            ArgumentBinder::bind(&call("send_email", &["a@b.com", "Hi", "Body text"]), &catalog)
                .unwrap();

        assert_eq!(tool.name, "send_email");
        assert_eq!(
            args.into_value(),
            json!({"to": "a@b.com", "subject": "Hi", "body": "Body text"})
        );
    }

    #[test]
    fn test_binding_never_matches_by_content() {
        let catalog = catalog();
        let (_, args) =
            ArgumentBinder::bind(&call("send_email", &["body", "to", "subject"]), &catalog)
                .unwrap();
        assert_eq!(args.get("to"), Some(&json!("body")));
        assert_eq!(args.get("body"), Some(&json!("subject")));
    }

    #[test]
    fn test_coercion_failure_names_parameter() {
        let catalog = catalog();
        let err = ArgumentBinder::bind(
            &call("draw_rectangle", &["100", "100", "not_a_number", "200"]),
            &catalog,
        )
        .unwrap_err();

        assert_eq!(
            err,
            BindError::TypeCoercion {
                parameter: "width".to_string(),
                value: "not_a_number".to_string(),
                expected: ParamType::Integer,
            }
        );
    }

    #[test]
    fn test_integer_rejects_fractions() {
        let catalog = catalog();
        let err =
            ArgumentBinder::bind(&call("draw_rectangle", &["1.5", "2", "3", "4"]), &catalog)
                .unwrap_err();
        assert!(matches!(err, BindError::TypeCoercion { ref parameter, .. } if parameter == "x"));
    }

    #[test]
    fn test_number_and_boolean() {
        let catalog = catalog();
        let (_, args) =
            ArgumentBinder::bind(&call("configure", &["0.75", "TRUE"]), &catalog).unwrap();
        assert_eq!(args.into_value(), json!({"ratio": 0.75, "enabled": true}));

        for bad in [["NaN", "true"], ["inf", "true"], ["1", "yes"]] {
            assert!(ArgumentBinder::bind(&call("configure", &bad), &catalog).is_err());
        }
    }

    #[test]
    fn test_arity_must_match_exactly() {
        let catalog = catalog();
        let err = ArgumentBinder::bind(&call("send_email", &["a@b.com", "Hi"]), &catalog)
            .unwrap_err();
        assert_eq!(
            err,
            BindError::ArityMismatch {
                tool: "send_email".to_string(),
                expected: 3,
                actual: 2,
                parameters: vec!["to".into(), "subject".into(), "body".into()],
            }
        );

        assert!(
            ArgumentBinder::bind(&call("send_email", &["a", "b", "c", "d"]), &catalog).is_err()
        );
    }

    #[test]
    fn test_unknown_tool() {
        let catalog = catalog();
        let err = ArgumentBinder::bind(&call("Send_Email", &["a", "b", "c"]), &catalog)
            .unwrap_err();
        assert_eq!(
            err,
            BindError::UnknownTool {
                name: "Send_Email".to_string()
            }
        );
    }

    #[test]
    fn test_binding_is_idempotent() {
        let catalog = catalog();
        let request = call("configure", &["3.14159", "false"]);
        let first = ArgumentBinder::bind(&request, &catalog).unwrap().1;
        let second = ArgumentBinder::bind(&request, &catalog).unwrap().1;
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }
}
