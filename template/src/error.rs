use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse template data: {0}")]
    Data(#[from] serde_json::Error),

    #[error("Failed to render template: {0}")]
    Render(#[from] minijinja::Error),

    #[error("{0}: {1}")]
    WithContext(String, Box<TemplateError>),
}

impl TemplateError {
    #[must_use]
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        Self::WithContext(context.into(), Box::new(self))
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Render(e) => {
                let detail = e.detail().map_or_else(|| e.kind().to_string(), str::to_string);
                match e.line() {
                    Some(line) => format!("Template error on line {line}: {detail}"),
                    None => format!("Template error: {detail}"),
                }
            }
            Self::WithContext(ctx, err) => format!("{ctx}: {}", err.user_message()),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TemplateError>;
