use super::ApiError;
use crate::domain::JobId;

pub fn validate_job_id(id: i32) -> Result<JobId, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid job ID: {id}. ID must be a positive integer"
        )));
    }
    Ok(JobId::new(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_job_id() {
        assert_eq!(validate_job_id(1).unwrap(), JobId::new(1));
        assert!(validate_job_id(12345).is_ok());
        assert!(validate_job_id(0).is_err());
        assert!(validate_job_id(-1).is_err());
    }
}
