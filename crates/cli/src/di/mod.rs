use dnstap_gen_application::services::EnvelopeBuilder;
use dnstap_gen_application::use_cases::{
    RunConnectionUseCase, RunLoadUseCase, SendPlan, SynthesizeExchangeUseCase,
};
use dnstap_gen_domain::LoadConfig;
use dnstap_gen_infrastructure::dns::HickoryDnsEncoder;
use dnstap_gen_infrastructure::dnstap::DnstapEncoder;
use dnstap_gen_infrastructure::framestream::{connector_for, ConnectTimeouts};
use std::sync::Arc;

pub struct Generator {
    pub run_load: Arc<RunLoadUseCase>,
}

impl Generator {
    pub fn new(config: &LoadConfig) -> anyhow::Result<Self> {
        let connector = connector_for(
            &config.target,
            ConnectTimeouts {
                connect: config.connect_timeout,
                handshake: config.handshake_timeout,
            },
        )?;

        let synthesizer = Arc::new(SynthesizeExchangeUseCase::new(
            Arc::new(HickoryDnsEncoder),
            config.template.clone(),
        ));
        let worker = Arc::new(RunConnectionUseCase::new(
            connector,
            synthesizer,
            EnvelopeBuilder::new(config.identity.clone(), config.version.clone()),
            Arc::new(DnstapEncoder),
            SendPlan::from(config),
        ));

        Ok(Self {
            run_load: Arc::new(RunLoadUseCase::new(
                worker,
                config.connections,
                config.policy,
                config.seed,
            )),
        })
    }
}
