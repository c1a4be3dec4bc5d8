use clap::Args;
use std::path::PathBuf;
use talent_intake::error::AppError;
use talent_intake::intake::{prepare_submission, PreparedSubmission, RequestMetadata};

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Path to a JSON submission, as the form would post it
    pub(crate) path: PathBuf,
    /// Print the record that would be written to the persistence API
    #[arg(long)]
    pub(crate) show_record: bool,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let body = std::fs::read(&args.path)?;
    let summary = check_submission(&body, args.show_record)?;
    println!("{summary}");
    Ok(())
}

fn check_submission(body: &[u8], show_record: bool) -> Result<String, AppError> {
    match prepare_submission(body, RequestMetadata::default())? {
        PreparedSubmission::Honeypot => {
            Ok("Honeypot field is filled in: the submission would be discarded".to_string())
        }
        PreparedSubmission::Accepted(record) => {
            let mut summary = format!(
                "Valid {} application from {}",
                record.application_type.label(),
                record.email
            );
            if show_record {
                let rendered = serde_json::to_string_pretty(&record)
                    .map_err(|err| AppError::Io(err.into()))?;
                summary.push('\n');
                summary.push_str(&rendered);
            }
            Ok(summary)
        }
    }
}
