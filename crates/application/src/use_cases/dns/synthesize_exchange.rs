use crate::ports::DnsMessageEncoder;
use crate::services::CorpusGenerator;
use dnstap_gen_domain::{DnsExchange, DnsQuery, GeneratorError, NameSource, QueryTemplate};
use std::sync::Arc;
use tracing::trace;

/// Builds one DNS question and its synthesized answer.
pub struct SynthesizeExchangeUseCase {
    encoder: Arc<dyn DnsMessageEncoder>,
    template: QueryTemplate,
}

impl SynthesizeExchangeUseCase {
    pub fn new(encoder: Arc<dyn DnsMessageEncoder>, template: QueryTemplate) -> Self {
        Self { encoder, template }
    }

    pub fn execute(&self, corpus: &mut CorpusGenerator) -> Result<DnsExchange, GeneratorError> {
        let domain: Arc<str> = match &self.template.name {
            NameSource::Fixed(name) => Arc::clone(name),
            NameSource::Random { min_len, max_len } => {
                let label = corpus.random_string(*min_len, *max_len);
                format!("{}.{}.", label, corpus.tld()).into()
            }
        };
        let record_type = self
            .template
            .record_type
            .unwrap_or_else(|| corpus.record_type());
        let query = DnsQuery::new(domain, record_type);

        let id = corpus.message_id();
        let rcode = corpus.response_code();

        let question = self.encoder.encode_question(id, &query)?;
        let answer = self
            .encoder
            .encode_answer(id, &query, record_type.canned_value(), rcode)?;

        trace!(
            id,
            question_len = question.len(),
            answer_len = answer.len(),
            "DNS exchange synthesized"
        );

        Ok(DnsExchange {
            query,
            rcode,
            question,
            answer,
        })
    }
}
