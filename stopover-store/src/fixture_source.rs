use async_trait::async_trait;
use chrono::NaiveDate;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use stopover_core::{CoreError, CoreResult, FlightOfferSource, RawInput};
use tracing::{debug, info};

const FALLBACK_FILE: &str = "default.json";

/// Serves offer dumps captured from the search stage out of a directory.
///
/// Lookup order for a leg: `{ORIGIN}-{DESTINATION}-{DATE}.json`,
/// `{ORIGIN}-{DESTINATION}.json`, then `default.json`. File contents are
/// passed on as text so malformed dumps still reach the evaluator's line scan.
#[derive(Debug, Clone)]
pub struct FixtureOfferSource {
    dir: PathBuf,
}

impl FixtureOfferSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn candidates(&self, origin: &str, destination: &str, date: NaiveDate) -> [PathBuf; 3] {
        [
            self.dir.join(format!("{}-{}-{}.json", origin, destination, date.format("%Y-%m-%d"))),
            self.dir.join(format!("{}-{}.json", origin, destination)),
            self.dir.join(FALLBACK_FILE),
        ]
    }
}

#[async_trait]
impl FlightOfferSource for FixtureOfferSource {
    async fn search(
        &self,
        origin: &str,
        destination: &str,
        date: NaiveDate,
    ) -> CoreResult<RawInput> {
        for path in self.candidates(origin, destination, date) {
            match tokio::fs::read_to_string(&path).await {
                Ok(contents) => {
                    info!("Loaded offers for {} -> {} from {}", origin, destination, path.display());
                    return Ok(RawInput::Text(contents));
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!("No offer fixture at {}", path.display());
                }
                Err(e) => {
                    return Err(CoreError::SourceError(format!(
                        "failed to read {}: {}",
                        path.display(),
                        e
                    )));
                }
            }
        }

        info!("No offers found for {} -> {} on {}", origin, destination, date);
        Ok(RawInput::empty())
    }
}
