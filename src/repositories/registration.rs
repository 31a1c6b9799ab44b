//! Registration repository: one entry point per registered URL.

use chrono::{DateTime, Utc};
use oxrdf::{Literal, NamedNode, Quad};
use reqwest::Url;

use crate::context::{AppConfig, AppStore, Context};
use crate::di::FromContext;
use crate::error::AppError;
use crate::graph::{serialize_trig, QueryExt, Row};
use crate::models::{canonical_timestamp, Registration};
use crate::vocab::{rdf, schema, xsd};

const READ_BEFORE_QUERY: &str = r#"
PREFIX schema: <http://schema.org/>
SELECT ?s ?datePosted ?validUntil WHERE {
  GRAPH $graph {
    ?s a schema:EntryPoint ;
      schema:datePosted ?datePosted ;
      schema:dateRead ?dateRead .
    OPTIONAL { ?s schema:validUntil ?validUntil . }
    FILTER (STR(?dateRead) < $cutoff)
  }
} GROUP BY ?s ?datePosted ?validUntil"#;

/// Repository for registrations in the registrations graph.
#[derive(FromContext, Clone)]
pub struct RegistrationRepository {
    store: AppStore,
    config: AppConfig,
}

impl RegistrationRepository {
    fn graph(&self) -> Result<NamedNode, AppError> {
        let graph = &self.config.graphs.registrations;
        NamedNode::new(graph.as_str()).map_err(|e| AppError::InvalidUrl(format!("{}: {}", graph, e)))
    }

    /// Replaces everything stored about the registration's URL.
    ///
    /// The old statements are deleted before the new ones are inserted; a
    /// failed delete leaves the old record in place and skips the insert.
    pub async fn store(&self, registration: &Registration) -> Result<(), AppError> {
        let graph = self.graph()?;
        let subject = url_node(&registration.url)?;
        let trig = serialize_trig(&registration_quads(registration, &subject, &graph))?;

        self.store.delete_statements(&subject, &graph).await?;
        self.store.insert_statements(trig).await?;

        tracing::debug!(url = %registration.url, datasets = registration.datasets.len(), "Stored registration");
        Ok(())
    }

    /// Finds registrations whose last read happened before `cutoff`.
    pub async fn find_registrations_read_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Registration>, AppError> {
        let rows = self
            .store
            .query(READ_BEFORE_QUERY)
            .param("graph", self.graph()?)
            .param("cutoff", Literal::new_simple_literal(canonical_timestamp(&cutoff)))
            .fetch_all()
            .await?;

        rows.iter().map(Self::row_to_registration).collect()
    }

    fn row_to_registration(row: &Row) -> Result<Registration, AppError> {
        let url: Url = row.get("s")?;
        let date_posted: DateTime<Utc> = row.get("datePosted")?;

        let mut registration = Registration::new(url, date_posted);
        registration.valid_until = row.get_opt("validUntil")?;
        Ok(registration)
    }
}

fn url_node(url: &Url) -> Result<NamedNode, AppError> {
    NamedNode::new(url.as_str()).map_err(|e| AppError::InvalidUrl(format!("{}: {}", url, e)))
}

fn date_time(timestamp: &DateTime<Utc>) -> Literal {
    Literal::new_typed_literal(canonical_timestamp(timestamp), xsd::DATE_TIME)
}

/// Statements describing a registration, all in `graph`.
fn registration_quads(registration: &Registration, subject: &NamedNode, graph: &NamedNode) -> Vec<Quad> {
    let about = |predicate, object: oxrdf::Term| {
        Quad::new(subject.clone(), predicate, object, graph.clone())
    };

    let mut quads = vec![
        about(schema::DATE_POSTED.into_owned(), date_time(&registration.date_posted).into()),
        about(rdf::TYPE.into_owned(), schema::ENTRY_POINT_CLASS.into_owned().into()),
        about(schema::ENCODING.into_owned(), schema::VOCABULARY.into_owned().into()),
    ];

    for dataset in &registration.datasets {
        quads.push(about(schema::ABOUT.into_owned(), dataset.clone().into()));
        quads.push(Quad::new(
            dataset.clone(),
            rdf::TYPE.into_owned(),
            schema::DATASET_CLASS.into_owned(),
            graph.clone(),
        ));
        if let Some(date_read) = &registration.date_read {
            quads.push(Quad::new(
                dataset.clone(),
                schema::DATE_READ.into_owned(),
                date_time(date_read),
                graph.clone(),
            ));
        }
    }

    if let Some(date_read) = &registration.date_read {
        quads.push(about(schema::DATE_READ.into_owned(), date_time(date_read).into()));
    }
    if let Some(status) = registration.status_code {
        quads.push(about(
            schema::STATUS.into_owned(),
            Literal::new_typed_literal(status.to_string(), xsd::INTEGER).into(),
        ));
    }
    if let Some(valid_until) = &registration.valid_until {
        quads.push(about(schema::VALID_UNTIL.into_owned(), date_time(valid_until).into()));
    }

    quads
}
