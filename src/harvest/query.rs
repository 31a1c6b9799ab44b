//! SELECT query that flattens schema.org dataset descriptions into rows.

/// Maximum number of rows requested from a source.
///
/// A harvest that consumes exactly this many rows may be incomplete.
pub const SPARQL_LIMIT: usize = 10_000;

/// Query run against every registration URL.
///
/// Dataset identifier, name, license, creator and distribution are required;
/// all other fields are optional. Variable names match [`crate::vocab`].
pub const SELECT_QUERY: &str = r#"
PREFIX schema: <http://schema.org/>

SELECT * WHERE {
  ?dataset a schema:Dataset ;
    schema:identifier ?identifier ;
    schema:name ?name ;
    schema:license ?license ;
    schema:creator ?creator ;
    schema:distribution ?distribution .

  OPTIONAL { ?dataset schema:description ?description }
  OPTIONAL { ?dataset schema:alternateName ?alternateName }
  OPTIONAL { ?dataset schema:dateCreated ?dateCreated }
  OPTIONAL { ?dataset schema:datePublished ?datePublished }
  OPTIONAL { ?dataset schema:dateModified ?dateModified }
  OPTIONAL { ?dataset schema:inLanguage ?language }
  OPTIONAL { ?dataset schema:isBasedOnUrl ?source }
  OPTIONAL { ?dataset schema:keywords ?keyword }
  OPTIONAL { ?dataset schema:spatialCoverage ?spatial }
  OPTIONAL { ?dataset schema:temporalCoverage ?temporal }
  OPTIONAL { ?dataset schema:version ?version }
  OPTIONAL { ?dataset schema:mainEntityOfPage ?mainEntityOfPage }

  FILTER isIRI(?license)

  ?creator a schema:Organization .
  OPTIONAL { ?creator schema:name ?creator_name }
  OPTIONAL { ?creator schema:email ?creator_email }
  OPTIONAL { ?creator schema:url ?creator_url }
  OPTIONAL { ?creator schema:sameAs ?creator_sameAs }

  ?distribution a schema:DataDownload .
  OPTIONAL { ?distribution schema:contentUrl ?distribution_url }
  OPTIONAL { ?distribution schema:encodingFormat ?distribution_format }
  OPTIONAL { ?distribution schema:fileFormat ?distribution_mediaType }
  OPTIONAL { ?distribution schema:datePublished ?distribution_datePublished }
  OPTIONAL { ?distribution schema:dateModified ?distribution_dateModified }
  OPTIONAL { ?distribution schema:description ?distribution_description }
  OPTIONAL { ?distribution schema:inLanguage ?distribution_language }
  OPTIONAL { ?distribution schema:license ?distribution_license }
  OPTIONAL { ?distribution schema:name ?distribution_name }
  OPTIONAL { ?distribution schema:contentSize ?distribution_size }
} LIMIT 10000
"#;
