// Runner - executes CLI commands against the simulation library

use crate::cli::{GenerateCmd, OutputFormat, WeightsCmd};
use anyhow::Context;
use kratos_sim::config::SimConfig;
use kratos_sim::sim::catalog::kratos_param_changes;
use kratos_sim::sim::registry::proposal_contents;
use kratos_sim::sim::ProposalContentRegistry;
use kratos_sim::types::{ParameterChangeProposal, ProtocolParameters};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt::Write as _;
use std::path::Path;
use tracing::{info, warn};

/// Characters of title shown in text output
const TITLE_PREVIEW: usize = 32;

pub fn run_generate(cmd: &GenerateCmd) -> anyhow::Result<()> {
    let mut config = load_config(cmd.config.as_deref())?;
    if let Some(seed) = cmd.seed {
        config.seed = seed;
    }
    if let Some(count) = cmd.count {
        config.proposals = count;
    }

    info!(
        seed = config.seed,
        proposals = config.proposals,
        "Generating parameter change proposals"
    );

    let proposals = generate(&config, cmd.check)?;

    let output = match cmd.format {
        OutputFormat::Json => serde_json::to_string_pretty(&proposals)?,
        OutputFormat::Text => render_text(&proposals),
    };
    println!("{output}");

    Ok(())
}

pub fn run_weights(cmd: &WeightsCmd) -> anyhow::Result<()> {
    let config = load_config(cmd.config.as_deref())?;
    let registry = build_registry(&config)?;

    for (key, weight) in registry.resolve_weights(&config.app_params)? {
        if weight == 0 {
            warn!("{} is disabled (weight 0)", key);
        }
        println!("{key}\t{weight}");
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SimConfig> {
    match path {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(SimConfig::default()),
    }
}

/// Registry with every proposal content this simulation knows about
pub fn build_registry(config: &SimConfig) -> anyhow::Result<ProposalContentRegistry> {
    let contents = proposal_contents(kratos_param_changes(), config.text_lengths());
    Ok(ProposalContentRegistry::from_contents(contents)?)
}

/// Generate `config.proposals` proposals from one seeded random source
pub fn generate(config: &SimConfig, check: bool) -> anyhow::Result<Vec<ParameterChangeProposal>> {
    config.validate()?;

    let registry = build_registry(config)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut proposals = Vec::new();

    for index in 0..config.proposals {
        let content = registry.pick(&mut rng, &config.app_params)?;
        let proposal = content
            .simulate(&mut rng)
            .with_context(|| format!("simulating {}", content.app_params_key()))?;

        if check {
            check_proposal(&proposal).with_context(|| format!("proposal #{index} failed checks"))?;
        }

        info!(
            index,
            kind = content.app_params_key(),
            changes = proposal.changes().len(),
            "Generated proposal"
        );
        proposals.push(proposal);
    }

    Ok(proposals)
}

/// Basic validation, then the changes previewed on top of genesis
fn check_proposal(proposal: &ParameterChangeProposal) -> anyhow::Result<()> {
    proposal.validate_basic()?;
    ProtocolParameters::genesis().preview(proposal.changes())?;
    Ok(())
}

fn render_text(proposals: &[ParameterChangeProposal]) -> String {
    let mut out = String::new();

    for (index, proposal) in proposals.iter().enumerate() {
        let title: String = proposal.title().chars().take(TITLE_PREVIEW).collect();
        let _ = writeln!(
            out,
            "Proposal #{} [{}/{}]",
            index + 1,
            proposal.proposal_route(),
            proposal.proposal_type()
        );
        let _ = writeln!(out, "  title: {title}...");
        let _ = writeln!(out, "  changes:");
        for change in proposal.changes() {
            let _ = writeln!(out, "    {} = {}", change.composed_key(), change.value());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kratos_sim::types::ParamChange;

    #[test]
    fn test_generate_is_reproducible() {
        let config = SimConfig {
            seed: 17,
            proposals: 5,
            ..SimConfig::default()
        };

        let first = generate(&config, true).unwrap();
        let second = generate(&config, true).unwrap();
        assert_eq!(first.len(), 5);
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_rejects_unbounded_count() {
        let config = SimConfig {
            proposals: usize::MAX,
            ..SimConfig::default()
        };

        let err = generate(&config, false).unwrap_err();
        assert!(err.to_string().contains("Too many proposals"));
    }

    #[test]
    fn test_check_rejects_conflicting_timelocks() {
        let changes = vec![
            ParamChange::new("governance", "timelock", Some("exit".into()), "200000"),
            ParamChange::new("governance", "timelock", Some("standard".into()), "400000"),
        ];
        let proposal = ParameterChangeProposal::new("t".into(), "d".into(), changes);

        let err = check_proposal(&proposal).unwrap_err();
        assert!(err.to_string().contains("Exit timelock"));
    }

    #[test]
    fn test_generate_respects_zero_weight() {
        let mut config = SimConfig::default();
        config
            .app_params
            .set_weight(kratos_sim::sim::registry::OP_WEIGHT_SUBMIT_PARAM_CHANGE_PROPOSAL, 0);

        let err = generate(&config, false).unwrap_err();
        assert!(err.to_string().contains("positive weight"));
    }

    #[test]
    fn test_render_text_lists_changes() {
        let config = SimConfig {
            seed: 3,
            ..SimConfig::default()
        };
        let proposals = generate(&config, false).unwrap();

        let text = render_text(&proposals);
        assert!(text.starts_with("Proposal #1 [params/ParameterChange]"));
        for change in proposals[0].changes() {
            assert!(text.contains(&change.composed_key()));
        }
    }
}
