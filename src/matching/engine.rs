use std::path::PathBuf;

use tracing::{debug, warn};

use crate::catalog::client::OeisClient;
use crate::catalog::offline::{load_names_map, search_stripped, NamesMap, OfflineSearch};
use crate::catalog::online::{search_online, OnlineSearch};
use crate::catalog::CorpusError;
use crate::core::hit::Hit;
use crate::core::types::Query;
use crate::matching::diagnosis::MismatchDiagnosis;
use crate::matching::merge::{filter_min_match_len, merge_hits};
use crate::matching::ranking::{rank, RankPolicy};

/// Default number of hits reported
pub const DEFAULT_MAX_HITS: usize = 10;

/// Default longest query prefix sent online
pub const DEFAULT_MAX_QUERY_TERMS: usize = 40;

/// Default shortest prefix tried in relax mode
pub const DEFAULT_RELAX_MIN_TERMS: usize = 8;

/// Configuration for the probe engine
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub max_hits: usize,
    pub max_query_terms: usize,
    pub relax_online: bool,
    pub relax_min_terms: usize,
    /// Hits with a shorter run are dropped after merging (clamped to at least 1)
    pub min_match_len: usize,
    pub rank: RankPolicy,
    /// Stop the offline scan after this many lines
    pub offline_max_scan: Option<usize>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            max_hits: DEFAULT_MAX_HITS,
            max_query_terms: DEFAULT_MAX_QUERY_TERMS,
            relax_online: false,
            relax_min_terms: DEFAULT_RELAX_MIN_TERMS,
            min_match_len: 1,
            rank: RankPolicy::Strict,
            offline_max_scan: None,
        }
    }
}

/// Local corpus files for the offline search
#[derive(Debug, Clone)]
pub struct OfflineCorpus {
    /// `stripped` or `stripped.gz`; must exist
    pub stripped: PathBuf,
    /// `names` or `names.gz`; failures to load it only cost the names
    pub names: Option<PathBuf>,
}

/// Outcome of one probe
#[derive(Debug, Clone)]
pub struct ProbeReport {
    /// Merged, filtered, ranked and truncated hits
    pub hits: Vec<Hit>,
    /// Why the online search produced nothing, if it failed
    pub online_error: Option<String>,
    /// Prefix length of the last online request
    pub online_query_terms: Option<usize>,
}

impl ProbeReport {
    /// Explain where the query diverges from the best hit
    #[must_use]
    pub fn explain_top(&self, query: &Query) -> Option<MismatchDiagnosis> {
        self.hits
            .first()
            .map(|top| MismatchDiagnosis::analyze(query, top))
    }
}

/// Runs the online and offline searches and reconciles their hits
pub struct ProbeEngine<'a> {
    client: Option<&'a OeisClient>,
    offline: Option<&'a OfflineCorpus>,
    config: ProbeConfig,
}

impl<'a> ProbeEngine<'a> {
    /// Create an engine with neither source enabled
    #[must_use]
    pub fn new(config: ProbeConfig) -> Self {
        Self {
            client: None,
            offline: None,
            config,
        }
    }

    /// Enable the online search
    #[must_use]
    pub fn with_client(mut self, client: &'a OeisClient) -> Self {
        self.client = Some(client);
        self
    }

    /// Enable the offline search
    #[must_use]
    pub fn with_offline(mut self, corpus: &'a OfflineCorpus) -> Self {
        self.offline = Some(corpus);
        self
    }

    #[must_use]
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Probe `query` against every enabled source.
    ///
    /// Online failures are reported in [`ProbeReport::online_error`] and never
    /// fail the probe.
    ///
    /// # Errors
    ///
    /// Returns `CorpusError` if the offline `stripped` file cannot be read.
    pub fn probe(&self, query: &Query) -> Result<ProbeReport, CorpusError> {
        let (online_hits, online_error, online_query_terms) = self.probe_online(query);
        let offline_hits = self.probe_offline(query)?;

        debug!(
            "{} online hits, {} offline hits",
            online_hits.len(),
            offline_hits.len()
        );

        let merged = merge_hits(offline_hits, online_hits).into_vec();
        let filtered = filter_min_match_len(merged, self.config.min_match_len);
        let mut hits = rank(filtered, self.config.rank);
        hits.truncate(self.config.max_hits);

        Ok(ProbeReport {
            hits,
            online_error,
            online_query_terms,
        })
    }

    fn probe_online(&self, query: &Query) -> (Vec<Hit>, Option<String>, Option<usize>) {
        let Some(client) = self.client else {
            return (Vec::new(), None, None);
        };

        let settings = OnlineSearch {
            max_hits: self.config.max_hits,
            max_query_terms: self.config.max_query_terms,
            relax: self.config.relax_online,
            relax_min_terms: self.config.relax_min_terms,
        };

        match search_online(client, query, &settings) {
            Ok(result) => (result.hits, None, Some(result.query_terms_used)),
            Err(e) => (Vec::new(), Some(e.to_string()), None),
        }
    }

    fn probe_offline(&self, query: &Query) -> Result<Vec<Hit>, CorpusError> {
        let Some(corpus) = self.offline else {
            return Ok(Vec::new());
        };

        let names: Option<NamesMap> = corpus.names.as_deref().and_then(|path| {
            load_names_map(path)
                .map_err(|e| warn!("couldn't load names file: {e}"))
                .ok()
        });

        let settings = OfflineSearch {
            max_hits: self.config.max_hits,
            max_scan: self.config.offline_max_scan,
        };
        search_stripped(query, &corpus.stripped, names.as_ref(), &settings)
    }
}
