use crate::utils::error::{QuizError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(QuizError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(QuizError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(QuizError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(QuizError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_file_extension(field_name: &str, path: &str, allowed: &[&str]) -> Result<()> {
    let extension = std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str());

    match extension {
        Some(ext) if allowed.contains(&ext) => Ok(()),
        Some(ext) => Err(QuizError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                ext,
                allowed.join(", ")
            ),
        }),
        None => Err(QuizError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| QuizError::MissingConfigError {
        field: field_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("notebook", "lesson.ipynb").is_ok());
        assert!(validate_path("notebook", "").is_err());
        assert!(validate_path("notebook", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("blanks", 10, 0, 100).is_ok());
        assert!(validate_range("blanks", 200, 0, 100).is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("notebook", "lesson.ipynb", &["ipynb"]).is_ok());
        assert!(validate_file_extension("notebook", "lesson.txt", &["ipynb"]).is_err());
        assert!(validate_file_extension("notebook", "lesson", &["ipynb"]).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("value".to_string());
        let absent: Option<String> = None;
        assert!(validate_required_field("input.notebook", &present).is_ok());
        assert!(validate_required_field("input.notebook", &absent).is_err());
    }
}
