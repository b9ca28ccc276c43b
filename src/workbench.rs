use crate::config;
use crate::scoring::calculator;
use crate::scoring::weights::WeightVector;
use crate::session::store::{SessionEntry, SessionStore};
use crate::session::token;
use crate::structures::rowset::io;
use crate::structures::rowset::table::RowSet;
use crate::structures::score_err::ScorecardError;

/// ties parser, session store, calculator and serializers together into
/// the upload / recalculate / download operations a front end drives.
/// The store is injected so callers pick the backing (and tests mock it).
pub struct Workbench<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> Workbench<S> {
    pub fn new(store: S) -> Self {
        Workbench { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// parses an uploaded file and opens a fresh session around it.
    /// Nothing is stored when parsing fails.
    pub fn upload(&self, bytes: &[u8], filename: &str) -> Result<String, ScorecardError> {
        let rowset = io::parse(bytes, filename)?;

        let token = token::new_token();
        log::info!(
            "session '{}' opened for '{}' ({} rows)",
            token,
            filename,
            rowset.number_of_rows()
        );
        self.store.put(&token, SessionEntry::new(rowset));
        Ok(token)
    }

    /// scores the session's raw row set with the given weights and
    /// remembers the result as the session's current scored table.
    /// A scoring failure leaves the previous scored table in place.
    pub fn recalculate(
        &self,
        session_token: &str,
        weights: &WeightVector,
    ) -> Result<RowSet, ScorecardError> {
        let mut entry = self
            .store
            .get(session_token)
            .ok_or_else(|| ScorecardError::SessionNotFound(session_token.to_string()))?;

        let scored = calculator::score(&entry.rowset, weights)?;

        entry.scored = Some(scored.clone());
        entry.weights = *weights;
        self.store.put(session_token, entry);

        Ok(scored)
    }

    /// the most recently computed scored table for this session, if any
    pub fn scored(&self, session_token: &str) -> Option<RowSet> {
        self.store.get(session_token).and_then(|entry| entry.scored)
    }

    /// the weights the session was last scored with
    pub fn weights(&self, session_token: &str) -> Option<WeightVector> {
        self.store.get(session_token).map(|entry| entry.weights)
    }

    /// CSV bytes of the current scored table. Downloads against an
    /// unknown session, or one that has never scored, quietly yield
    /// nothing instead of erroring.
    pub fn export_csv(&self, session_token: &str) -> Result<Option<Vec<u8>>, ScorecardError> {
        match self.scored(session_token) {
            Some(rowset) => rowset.to_csv().map(Some),
            None => {
                log::debug!("csv export for '{session_token}' skipped, nothing scored");
                Ok(None)
            }
        }
    }

    /// XLSX bytes of the current scored table, single sheet, same
    /// no-op behavior as [`Workbench::export_csv`]
    pub fn export_xlsx(&self, session_token: &str) -> Result<Option<Vec<u8>>, ScorecardError> {
        match self.scored(session_token) {
            Some(rowset) => rowset.to_xlsx(config::EXPORT_SHEET_NAME).map(Some),
            None => {
                log::debug!("xlsx export for '{session_token}' skipped, nothing scored");
                Ok(None)
            }
        }
    }
}
