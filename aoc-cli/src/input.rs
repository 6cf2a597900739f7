//! Where puzzle inputs come from

use crate::cache::InputCache;
use crate::error::ExecutorError;
use aoc_http_client::AocClient;
use std::path::PathBuf;
use zeroize::Zeroizing;

/// Client and session used to download inputs missing from the cache
pub struct Remote {
    pub client: AocClient,
    pub session: Zeroizing<String>,
}

pub enum InputSource {
    /// One explicit file, used for whichever day is being run
    File(PathBuf),
    /// The cache, filled from the site when a session is available
    Cached {
        cache: InputCache,
        remote: Option<Remote>,
    },
}

impl InputSource {
    pub fn load(&self, year: u16, day: u8) -> Result<String, ExecutorError> {
        match self {
            InputSource::File(path) => {
                std::fs::read_to_string(path).map_err(|source| ExecutorError::InputFile {
                    path: path.clone(),
                    source,
                })
            }
            InputSource::Cached { cache, remote } => {
                if let Some(input) = cache
                    .read(year, day)
                    .map_err(|source| ExecutorError::InputRead { year, day, source })?
                {
                    tracing::debug!(year, day, "input read from cache");
                    return Ok(input);
                }

                let remote = remote
                    .as_ref()
                    .ok_or(ExecutorError::InputMissing { year, day })?;
                let input = remote
                    .client
                    .get_input(year, day, &remote.session)
                    .map_err(|source| ExecutorError::InputFetch { year, day, source })?;

                // a failed write only costs a download next time
                if let Err(e) = cache.write(year, day, &input) {
                    tracing::warn!(year, day, error = %e, "could not cache input");
                }
                Ok(input)
            }
        }
    }
}
