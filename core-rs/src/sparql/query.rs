/**
 * query.rs
 * Query builders for the Framester/MetaNet SPARQL vocabulary
 */

/// Query form, used to check the endpoint returned the matching result shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryForm {
    Select,
    Ask,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparqlQuery {
    query: String,
}

impl SparqlQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.query
    }

    /// First keyword after the prologue decides the form
    pub fn form(&self) -> QueryForm {
        let is_ask = self
            .query
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .find(|line| !line.to_ascii_uppercase().starts_with("PREFIX"))
            .map(|line| line.to_ascii_uppercase().starts_with("ASK"))
            .unwrap_or(false);

        if is_ask {
            QueryForm::Ask
        } else {
            QueryForm::Select
        }
    }

    /// Source/target frames, roles, entailments and examples of one metaphor.
    ///
    /// Every field sits in its own OPTIONAL, so a metaphor with several
    /// values per field yields the cross product of them.
    pub fn metaphor_mappings(metaphor_iri: &str) -> Self {
        Self::new(format!(
            r#"
            PREFIX metanet: <https://w3id.org/framester/metanet/schema/>
            PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>

            SELECT DISTINCT ?metaphor ?src ?tgt ?srcRole ?tgtRole ?ent ?ex
            WHERE {{
                BIND(<{metaphor_iri}> AS ?metaphor)
                OPTIONAL {{ ?metaphor metanet:hasSourceFrame ?src . }}
                OPTIONAL {{ ?metaphor metanet:hasTargetFrame ?tgt . }}
                OPTIONAL {{ ?metaphor metanet:sourceRole ?srcRole . }}
                OPTIONAL {{ ?metaphor metanet:targetRole ?tgtRole . }}
                OPTIONAL {{ ?metaphor metanet:hasEntailmentDescription ?ent . }}
                OPTIONAL {{ ?metaphor metanet:hasExample ?ex . }}
            }}
            "#,
            metaphor_iri = metaphor_iri
        ))
    }

    /// The seed frame plus every frame linked to it by skos:closeMatch or
    /// schema:subsumedUnder, in either direction
    pub fn frame_candidates(seed_iri: &str) -> Self {
        Self::new(format!(
            r#"
            PREFIX skos: <http://www.w3.org/2004/02/skos/core#>
            PREFIX schema: <http://schema.org/>

            SELECT DISTINCT ?candidate
            WHERE {{
                {{
                    VALUES ?p {{ skos:closeMatch schema:subsumedUnder }}
                    {{ <{seed}> ?p ?candidate . }} UNION {{ ?candidate ?p <{seed}> . }}
                }}
                UNION
                {{
                    BIND(<{seed}> AS ?candidate)
                }}
            }}
            "#,
            seed = seed_iri
        ))
    }

    /// Does some metaphor use this frame as its source frame
    pub fn is_source_frame(frame_iri: &str) -> Self {
        Self::frame_role_check("hasSourceFrame", frame_iri)
    }

    /// Does some metaphor use this frame as its target frame
    pub fn is_target_frame(frame_iri: &str) -> Self {
        Self::frame_role_check("hasTargetFrame", frame_iri)
    }

    fn frame_role_check(predicate: &str, frame_iri: &str) -> Self {
        Self::new(format!(
            r#"
            PREFIX metanet: <https://w3id.org/framester/metanet/schema/>

            ASK {{
                {{ ?m metanet:{predicate} <{frame}> . }}
                UNION
                {{ <{frame}> metanet:{predicate} ?x . }}
            }}
            "#,
            predicate = predicate,
            frame = frame_iri
        ))
    }

    /// Frame element labels and WordNet-looking synset labels of a frame.
    ///
    /// rdfs:label wins over skos:prefLabel when both exist. The synset
    /// filter is a plain substring test on the IRI.
    pub fn frame_elements_and_synsets(frame_iri: &str) -> Self {
        Self::new(format!(
            r#"
            PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
            PREFIX skos: <http://www.w3.org/2004/02/skos/core#>
            PREFIX schema: <http://schema.org/>
            PREFIX metanet: <https://w3id.org/framester/metanet/schema/>
            PREFIX framenet: <https://w3id.org/framester/framenet/schema/>

            SELECT DISTINCT ?feLabel ?synLabel
            WHERE {{
                BIND(<{frame}> AS ?f)

                OPTIONAL {{
                    VALUES ?feRel {{
                        framenet:fe framenet:frameElement
                        schema:hasPart
                        metanet:sourceRole metanet:targetRole
                    }}
                    ?f ?feRel ?fe .
                    OPTIONAL {{ ?fe rdfs:label ?feRdfsLabel . }}
                    OPTIONAL {{ ?fe skos:prefLabel ?fePrefLabel . }}
                    BIND(COALESCE(?feRdfsLabel, ?fePrefLabel) AS ?feLabel)
                }}

                OPTIONAL {{
                    {{ ?f skos:closeMatch ?syn . }}
                    UNION
                    {{ ?f schema:sameAs ?syn . }}
                    UNION
                    {{ ?f framenet:lu ?lu . ?lu skos:closeMatch ?syn . }}
                    FILTER(CONTAINS(STR(?syn), "wn"))
                    OPTIONAL {{ ?syn rdfs:label ?synRdfsLabel . }}
                    OPTIONAL {{ ?syn skos:prefLabel ?synPrefLabel . }}
                    BIND(COALESCE(?synRdfsLabel, ?synPrefLabel) AS ?synLabel)
                }}
            }}
            "#,
            frame = frame_iri
        ))
    }
}
