//! Scoped search session over the activity index
//!
//! A `Searcher` holds an `IndexHandle` for its whole lifetime. The handle is
//! released when the searcher is dropped, whether the caller returns
//! normally, bails out with `?`, or panics.
//!
//! Query strategy:
//! - Free text is parsed over name, comment, product, categories and location
//!   with per-field boosts; terms are combined with AND.
//! - Filters are analysed with the target field's tokenizer and added as
//!   zero-scored required clauses, so they narrow hits without reranking them.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tantivy::collector::{Collector, TopDocs};
use tantivy::query::{
    BooleanQuery, ConstScoreQuery, EmptyQuery, Occur, PhraseQuery, Query, QueryParser,
    TermQuery,
};
use tantivy::schema::{Field, IndexRecordOption, Value};
use tantivy::tokenizer::TokenStream;
use tantivy::{DocAddress, TantivyDocument, Term};

use super::collector::TimeLimitCollector;
use super::filter::{FilterExpr, FilterField, FilterTerm};
use super::request::SearchRequest;
use super::results::{RawRecord, SearchResults};
use super::SearchError;
use crate::activity::ActivityResolver;
use crate::config::SearchOptions;
use crate::index::{IndexHandle, IndexManager};

/// A search session; dropping it releases the index handle
pub struct Searcher {
    handle: IndexHandle,
    options: SearchOptions,
}

impl Searcher {
    /// Open a session with default ranking options
    pub fn open(manager: &IndexManager) -> Result<Self, SearchError> {
        Self::with_options(manager, &SearchOptions::default())
    }

    pub fn with_options(
        manager: &IndexManager,
        options: &SearchOptions,
    ) -> Result<Self, SearchError> {
        Ok(Self {
            handle: manager.acquire()?,
            options: options.clone(),
        })
    }

    pub fn handle(&self) -> &IndexHandle {
        &self.handle
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Release the index handle now rather than at end of scope
    pub fn close(self) {}

    /// Search and return raw stored records
    pub fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchResults<RawRecord>, SearchError> {
        let start = Instant::now();

        for keyword in request.ignored_filters() {
            tracing::debug!(keyword, "Ignoring unsupported filter keyword");
        }

        let parsed = self.query_parser().parse_query(&request.query)?;
        let query = match self.filter_query(&request.filter_expr())? {
            Some(filter) => Box::new(BooleanQuery::new(vec![
                (Occur::Must, parsed),
                (Occur::Must, Box::new(ConstScoreQuery::new(filter, 0.0)) as Box<dyn Query>),
            ])) as Box<dyn Query>,
            None => parsed,
        };

        let budget = request.max_duration.or_else(|| self.options.max_duration());
        let results = match &request.facet {
            None => {
                let limit = request.limit.unwrap_or(self.options.default_limit);
                SearchResults::Ranked(self.ranked(query.as_ref(), limit, budget)?)
            }
            Some(facet) => SearchResults::Grouped(self.grouped(query.as_ref(), facet, budget)?),
        };

        tracing::debug!(
            query = %request.query,
            facet = ?request.facet,
            hits = results.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Search complete"
        );

        Ok(results)
    }

    /// Search and resolve every hit into a domain activity
    pub fn search_activities<R>(
        &self,
        request: &SearchRequest,
        resolver: &R,
    ) -> Result<SearchResults<R::Activity>, SearchError>
    where
        R: ActivityResolver + ?Sized,
    {
        self.search(request)?.resolve(resolver)
    }

    fn query_parser(&self) -> QueryParser {
        let fields = self.handle.fields();
        let boosts = &self.options.boosts;

        let mut parser = QueryParser::for_index(self.handle.index(), fields.searchable().to_vec());
        parser.set_conjunction_by_default();
        for (field, boost) in [
            (fields.name, boosts.name),
            (fields.comment, boosts.comment),
            (fields.product, boosts.product),
            (fields.categories, boosts.categories),
            (fields.location, boosts.location),
        ] {
            parser.set_field_boost(field, boost);
        }
        parser
    }

    fn filter_field(&self, field: FilterField) -> Field {
        let fields = self.handle.fields();
        match field {
            FilterField::Name => fields.name,
            FilterField::Product => fields.product,
            FilterField::Location => fields.location,
            FilterField::Database => fields.database,
        }
    }

    fn filter_query(&self, expr: &FilterExpr) -> Result<Option<Box<dyn Query>>, SearchError> {
        match expr {
            FilterExpr::None => Ok(None),
            FilterExpr::Term(term) => Ok(Some(self.term_query(term)?)),
            FilterExpr::And(terms) => {
                let clauses = terms
                    .iter()
                    .map(|term| -> Result<_, SearchError> {
                        Ok((Occur::Must, self.term_query(term)?))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Some(Box::new(BooleanQuery::new(clauses))))
            }
        }
    }

    /// Equality on one field, tokenized the way the field was indexed
    ///
    /// A value that analyses to several tokens must match them as a phrase,
    /// in order and adjacent.
    fn term_query(&self, term: &FilterTerm) -> Result<Box<dyn Query>, SearchError> {
        let field = self.filter_field(term.field);
        let mut analyzer = self.handle.index().tokenizer_for_field(field)?;
        let mut stream = analyzer.token_stream(&term.value);

        let mut terms: Vec<(usize, Term)> = Vec::new();
        while stream.advance() {
            let token = stream.token();
            terms.push((token.position, Term::from_field_text(field, &token.text)));
        }

        Ok(match terms.len() {
            0 => Box::new(EmptyQuery),
            1 => {
                let (_, token) = terms.remove(0);
                Box::new(TermQuery::new(token, IndexRecordOption::Basic))
            }
            _ => Box::new(PhraseQuery::new_with_offset(terms)),
        })
    }

    fn ranked(
        &self,
        query: &dyn Query,
        limit: usize,
        budget: Option<Duration>,
    ) -> Result<Vec<RawRecord>, SearchError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let searcher = self.handle.searcher();
        let hits = collect(&searcher, query, TopDocs::with_limit(limit), budget)?;
        hits.into_iter()
            .map(|(_, address)| self.stored_fields(&searcher, address))
            .collect()
    }

    /// All hits grouped by the stored value of `facet`, best first in each group
    ///
    /// Hits with no value for the facet belong to no group.
    fn grouped(
        &self,
        query: &dyn Query,
        facet: &str,
        budget: Option<Duration>,
    ) -> Result<BTreeMap<String, Vec<RawRecord>>, SearchError> {
        if self.handle.schema().get_field(facet).is_err() {
            return Err(SearchError::UnknownField(facet.to_string()));
        }

        let searcher = self.handle.searcher();
        let mut groups: BTreeMap<String, Vec<RawRecord>> = BTreeMap::new();
        let num_docs = searcher.num_docs() as usize;
        if num_docs == 0 {
            return Ok(groups);
        }

        let hits = collect(&searcher, query, TopDocs::with_limit(num_docs), budget)?;
        for (_, address) in hits {
            let record = self.stored_fields(&searcher, address)?;
            let Some(value) = record.get(facet).filter(|v| !v.is_empty()).cloned() else {
                continue;
            };
            groups.entry(value).or_default().push(record);
        }
        Ok(groups)
    }

    fn stored_fields(
        &self,
        searcher: &tantivy::Searcher,
        address: DocAddress,
    ) -> Result<RawRecord, SearchError> {
        let doc: TantivyDocument = searcher.doc(address)?;
        let schema = self.handle.schema();

        let mut record = RawRecord::new();
        for (field, entry) in schema.fields() {
            if !entry.is_stored() {
                continue;
            }
            if let Some(text) = doc.get_first(field).and_then(|v| v.as_str()) {
                record.insert(entry.name().to_string(), text.to_string());
            }
        }
        Ok(record)
    }
}

fn collect<C: Collector>(
    searcher: &tantivy::Searcher,
    query: &dyn Query,
    collector: C,
    budget: Option<Duration>,
) -> Result<C::Fruit, SearchError> {
    match budget {
        None => Ok(searcher.search(query, &collector)?),
        Some(budget) => searcher
            .search(query, &TimeLimitCollector::new(collector, budget))?
            .ok_or(SearchError::Timeout(budget)),
    }
}
