//! Vocabulary terms and the schema.org → DCAT field mapping.
//!
//! Harvested sources describe datasets in schema.org. The register stores them
//! as DCAT, Dublin Core terms, FOAF and OWL. Each mapping table lists the query
//! variable (without `?`) and the predicate its value is stored under.

use oxrdf::NamedNodeRef;

pub mod rdf {
    use oxrdf::NamedNodeRef;

    pub const TYPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
}

pub mod xsd {
    use oxrdf::NamedNodeRef;

    pub const DATE_TIME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#dateTime");

    pub const INTEGER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#integer");
}

pub mod dcat {
    use oxrdf::NamedNodeRef;

    pub const DATASET_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/dcat#Dataset");

    pub const DISTRIBUTION_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/dcat#Distribution");

    pub const DISTRIBUTION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/dcat#distribution");

    pub const ACCESS_URL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/dcat#accessURL");

    pub const MEDIA_TYPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/dcat#mediaType");

    pub const BYTE_SIZE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/dcat#byteSize");

    pub const KEYWORD: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/dcat#keyword");

    pub const LANDING_PAGE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/dcat#landingPage");
}

pub mod dct {
    use oxrdf::NamedNodeRef;

    pub const IDENTIFIER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/identifier");
    pub const TITLE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/title");
    pub const ALTERNATIVE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/alternative");
    pub const DESCRIPTION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/description");
    pub const LICENSE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/license");
    pub const CREATED: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/created");
    pub const ISSUED: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/issued");
    pub const MODIFIED: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/modified");
    pub const LANGUAGE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/language");
    pub const SOURCE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/source");
    pub const FORMAT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/format");
    pub const CREATOR: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/creator");
}

pub mod foaf {
    use oxrdf::NamedNodeRef;

    pub const ORGANIZATION_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://xmlns.com/foaf/0.1/Organization");
    pub const NAME: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://xmlns.com/foaf/0.1/name");
    pub const MBOX: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://xmlns.com/foaf/0.1/mbox");
    pub const WORKPLACE_HOMEPAGE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://xmlns.com/foaf/0.1/workplaceHomepage");
}

pub mod owl {
    use oxrdf::NamedNodeRef;

    pub const SAME_AS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#sameAs");
    pub const VERSION_INFO: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#versionInfo");
}

/// Registry bookkeeping terms. The registration graph uses the `http` form.
pub mod schema {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://schema.org/";
    pub const HTTPS_NAMESPACE: &str = "https://schema.org/";

    pub const VOCABULARY: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://schema.org");
    pub const DATASET_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://schema.org/Dataset");
    pub const ENTRY_POINT_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://schema.org/EntryPoint");
    pub const DATE_POSTED: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://schema.org/datePosted");
    pub const DATE_READ: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://schema.org/dateRead");
    pub const ENCODING: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://schema.org/encoding");
    pub const ABOUT: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://schema.org/about");
    pub const STATUS: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://schema.org/status");
    pub const VALID_UNTIL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://schema.org/validUntil");

    /// `schema:Dataset` after prefix standardization of dereferenced documents.
    pub const HTTPS_DATASET_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("https://schema.org/Dataset");
}

/// Property of entries in the allowed domain names graph.
pub const ALLOWED_DOMAIN_NAME: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(
    "https://data.netwerkdigitaalerfgoed.nl/allowed_domain_names/def/domain_name",
);

/// A query variable and the predicate its bound value is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub variable: &'static str,
    pub predicate: NamedNodeRef<'static>,
}

const fn field(variable: &'static str, predicate: NamedNodeRef<'static>) -> FieldMapping {
    FieldMapping {
        variable,
        predicate,
    }
}

/// Dataset variables. See <https://www.w3.org/TR/vocab-dcat-2/#Class:Dataset>.
pub const DATASET_FIELDS: &[FieldMapping] = &[
    field("identifier", dct::IDENTIFIER),
    field("name", dct::TITLE),
    field("alternateName", dct::ALTERNATIVE),
    field("description", dct::DESCRIPTION),
    field("license", dct::LICENSE),
    field("dateCreated", dct::CREATED),
    field("datePublished", dct::ISSUED),
    field("dateModified", dct::MODIFIED),
    field("language", dct::LANGUAGE),
    field("source", dct::SOURCE),
    field("keyword", dcat::KEYWORD),
    field("mainEntityOfPage", dcat::LANDING_PAGE),
    field("version", owl::VERSION_INFO),
];

/// Creator (agent) variables.
pub const CREATOR_FIELDS: &[FieldMapping] = &[
    field("creator_name", foaf::NAME),
    field("creator_email", foaf::MBOX),
    field("creator_url", foaf::WORKPLACE_HOMEPAGE),
    field("creator_sameAs", owl::SAME_AS),
];

/// Distribution variables. See <https://www.w3.org/TR/vocab-dcat-2/#Class:Distribution>.
pub const DISTRIBUTION_FIELDS: &[FieldMapping] = &[
    field("distribution_url", dcat::ACCESS_URL),
    field("distribution_mediaType", dcat::MEDIA_TYPE),
    field("distribution_format", dct::FORMAT),
    field("distribution_datePublished", dct::ISSUED),
    field("distribution_dateModified", dct::MODIFIED),
    field("distribution_description", dct::DESCRIPTION),
    field("distribution_language", dct::LANGUAGE),
    field("distribution_license", dct::LICENSE),
    field("distribution_name", dct::TITLE),
    field("distribution_size", dcat::BYTE_SIZE),
];
