use clap::Args;

use crate::modules::analysis::ProviderType;
use crate::modules::config::{
    AppConfig, ConfigModule, PartialAnalysisConfig, PartialAppConfig, PartialClassifierConfig,
};
use crate::shared::{AppError, AppResult};

/// `config set` 参数
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigSetArgs {
    /// Classifier provider (huggingface | keyword)
    #[arg(long)]
    pub provider: Option<ProviderType>,

    /// Model identifier for remote classifiers
    #[arg(long)]
    pub model: Option<String>,

    /// Base URL of the inference API
    #[arg(long)]
    pub base_url: Option<String>,

    /// API token sent as a bearer token
    #[arg(long)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Number of classification requests in flight
    #[arg(long)]
    pub concurrency: Option<usize>,
}

impl ConfigSetArgs {
    pub fn into_partial(self) -> PartialAppConfig {
        let classifier = PartialClassifierConfig {
            id: None,
            provider_type: self.provider,
            base_url: self.base_url,
            api_key: self.api_key,
            model: self.model,
            timeout_secs: self.timeout_secs,
        };
        let has_classifier = classifier.provider_type.is_some()
            || classifier.base_url.is_some()
            || classifier.api_key.is_some()
            || classifier.model.is_some()
            || classifier.timeout_secs.is_some();

        PartialAppConfig {
            classifier: has_classifier.then_some(classifier),
            analysis: self.concurrency.map(|concurrency| PartialAnalysisConfig {
                concurrency: Some(concurrency),
                ..Default::default()
            }),
        }
    }
}

/// 渲染配置，隐藏 API token
pub fn render_config(config: &AppConfig) -> AppResult<String> {
    let mut masked = config.clone();
    if !masked.classifier.api_key.is_empty() {
        masked.classifier.api_key = "********".to_string();
    }
    Ok(serde_json::to_string_pretty(&masked)?)
}

pub async fn config_show(module: &ConfigModule) -> AppResult<AppConfig> {
    let config = module.get_all().await?;
    println!("{}", render_config(&config)?);
    Ok(config)
}

pub async fn config_reset(module: &ConfigModule) -> AppResult<AppConfig> {
    let config = module.reset().await?;
    println!("Configuration reset to defaults");
    Ok(config)
}

pub async fn config_set(module: &ConfigModule, args: ConfigSetArgs) -> AppResult<AppConfig> {
    let partial = args.into_partial();
    if partial.is_empty() {
        return Err(AppError::InvalidArgument(
            "nothing to set, pass at least one option".to_string(),
        ));
    }

    let config = module.update(partial).await?;
    println!("{}", render_config(&config)?);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::config::ConfigError;

    #[test]
    fn test_into_partial_only_sets_given_fields() {
        let partial = ConfigSetArgs {
            concurrency: Some(4),
            ..Default::default()
        }
        .into_partial();

        assert!(partial.classifier.is_none());
        assert_eq!(partial.analysis.unwrap().concurrency, Some(4));
        assert!(ConfigSetArgs::default().into_partial().is_empty());
    }

    #[test]
    fn test_render_config_masks_api_key() {
        let mut config = AppConfig::default();
        config.classifier.api_key = "secret-token".to_string();

        let rendered = render_config(&config).unwrap();
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("\"apiKey\": \"********\""));
    }

    #[tokio::test]
    async fn test_config_set_and_reset() {
        let module = ConfigModule::new_in_memory();

        let updated = config_set(
            &module,
            ConfigSetArgs {
                provider: Some(ProviderType::Keyword),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.classifier.provider_type, ProviderType::Keyword);

        let reset = config_reset(&module).await.unwrap();
        assert_eq!(reset, AppConfig::default());
    }

    #[tokio::test]
    async fn test_config_set_rejects_invalid_values() {
        let module = ConfigModule::new_in_memory();

        let result = config_set(
            &module,
            ConfigSetArgs {
                concurrency: Some(1000),
                ..Default::default()
            },
        )
        .await;

        assert!(matches!(
            result,
            Err(AppError::ConfigError(ConfigError::ValidationError { .. }))
        ));
        assert!(matches!(
            config_set(&module, ConfigSetArgs::default()).await,
            Err(AppError::InvalidArgument(_))
        ));
    }
}
