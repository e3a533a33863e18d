//! Configuration validation

use super::*;
use anyhow::Result;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_sampling(&config.sampling)?;
    validate_output(&config.output)?;
    Ok(())
}

/// Validate sampling configuration
pub fn validate_sampling(sampling: &SamplingConfig) -> Result<()> {
    if let Some(mu) = sampling.mu {
        if !mu.is_finite() || mu < 0.0 {
            anyhow::bail!("expected yield mu must be finite and non-negative, got {}", mu);
        }
    }

    if sampling.replicas == 0 {
        anyhow::bail!("replicas must be at least 1, got 0");
    }

    if sampling.replica_index.is_some() && sampling.replicas != 1 {
        anyhow::bail!(
            "replica_index selects single-replica mode and cannot be combined with replicas = {}",
            sampling.replicas
        );
    }

    Ok(())
}

/// Validate output configuration
pub fn validate_output(output: &OutputConfig) -> Result<()> {
    if output.chunk_capacity == 0 {
        anyhow::bail!("chunk_capacity must be at least 1, got 0");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_mu() {
        let mut config = Config::default();
        config.sampling.mu = Some(-1.0);
        assert!(validate_config(&config).is_err());

        config.sampling.mu = Some(f64::NAN);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_mu_is_legal() {
        let mut config = Config::default();
        config.sampling.mu = Some(0.0);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_replicas() {
        let mut config = Config::default();
        config.sampling.replicas = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_mixed_modes() {
        let mut config = Config::default();
        config.sampling.replica_index = Some(3);
        config.sampling.replicas = 10;
        assert!(validate_config(&config).is_err());

        config.sampling.replicas = 1;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_chunk_capacity() {
        let mut config = Config::default();
        config.output.chunk_capacity = 0;
        assert!(validate_config(&config).is_err());
    }
}
