use crate::aws::client::{self, SsmApi};
use crate::config::{MAX_PAGE_SIZE, StoreConfig};
use crate::error::{ParamStoreError, Result};
use crate::parameters::{Parameter, Parameters};
use aws_sdk_ssm::Client;
use aws_sdk_ssm::error::BuildError;
use aws_sdk_ssm::operation::get_parameter::GetParameterInput;
use aws_sdk_ssm::operation::get_parameters_by_path::GetParametersByPathInput;
use aws_sdk_ssm::operation::put_parameter::PutParameterInput;
use aws_sdk_ssm::types::ParameterType;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Read and write access to AWS SSM Parameter Store.
pub struct ParameterStore<C = Client> {
    ssm: C,
    page_size: Option<i32>,
}

impl ParameterStore<Client> {
    /// Build a store on a real SSM client, loading credentials and region
    /// from the AWS default provider chain.
    pub async fn connect(config: &StoreConfig) -> Self {
        let ssm = client::create_ssm_client(config).await;
        Self {
            ssm,
            page_size: config.page_size,
        }
    }
}

impl<C: SsmApi> ParameterStore<C> {
    pub fn with_client(ssm: C) -> Self {
        Self {
            ssm,
            page_size: None,
        }
    }

    /// Ask for at most `page_size` entries per `GetParametersByPath` page.
    pub fn with_page_size(mut self, page_size: i32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn client(&self) -> &C {
        &self.ssm
    }

    /// Fetch every parameter directly under `path`, following pagination
    /// until SSM stops returning a continuation token.
    ///
    /// For example `/my-service/dev/` returns `/my-service/dev/param-a`,
    /// `/my-service/dev/param-b`, but not nested paths. Requires
    /// `ssm:GetParametersByPath` on `arn:aws:ssm:<region>:<account>:parameter/my-service/dev/*`.
    pub async fn get_all_parameters_by_path(&self, path: &str, decrypt: bool) -> Result<Parameters> {
        let max_results = self.checked_page_size()?;
        let mut entries = HashMap::new();
        let mut seen_tokens = HashSet::new();
        let mut next_token: Option<String> = None;
        let mut page = 0usize;

        loop {
            let input = GetParametersByPathInput::builder()
                .path(path)
                .with_decryption(decrypt)
                .set_max_results(max_results)
                .set_next_token(next_token.take())
                .build()?;

            let output = self.ssm.get_parameters_by_path(input).await?;
            page += 1;

            let fetched = output.parameters.unwrap_or_default();
            debug!(path, page, count = fetched.len(), "fetched parameter page");

            for parameter in fetched {
                let Some(name) = parameter.name else {
                    continue;
                };
                entries.insert(name, Parameter::new(parameter.value));
            }

            // Any token seen before means the service is cycling.
            match output.next_token.filter(|token| !token.is_empty()) {
                None => break,
                Some(token) => {
                    if !seen_tokens.insert(token.clone()) {
                        return Err(ParamStoreError::RepeatedToken(token));
                    }
                    next_token = Some(token);
                }
            }
        }

        debug!(path, pages = page, total = entries.len(), "fetched parameters by path");
        Ok(Parameters::new(path, entries))
    }

    /// Fetch a single parameter by its full name, e.g. `/my-service/dev/param-1`.
    ///
    /// Requires `ssm:GetParameter` on that parameter's ARN.
    pub async fn get_parameter(&self, name: &str, decrypt: bool) -> Result<Parameter> {
        if name.is_empty() {
            return Err(ParamStoreError::InvalidName);
        }

        let input = GetParameterInput::builder()
            .name(name)
            .with_decryption(decrypt)
            .build()?;

        match self.ssm.get_parameter(input).await {
            Ok(output) => Ok(Parameter::new(output.parameter.and_then(|p| p.value))),
            Err(aws_sdk_ssm::Error::ParameterNotFound(_)) => {
                Err(ParamStoreError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write `value` as a `SecureString` encrypted with the account's default key.
    /// Returns the new parameter version.
    pub async fn put_secure_parameter(
        &self,
        name: &str,
        value: &str,
        overwrite: bool,
    ) -> Result<i64> {
        self.put_secure(name, value, overwrite, None).await
    }

    /// Like [`Self::put_secure_parameter`], encrypting with the customer managed
    /// key `key_id`. An empty `key_id` falls back to the default key.
    pub async fn put_secure_parameter_with_cmk(
        &self,
        name: &str,
        value: &str,
        overwrite: bool,
        key_id: &str,
    ) -> Result<i64> {
        self.put_secure(name, value, overwrite, Some(key_id)).await
    }

    async fn put_secure(
        &self,
        name: &str,
        value: &str,
        overwrite: bool,
        key_id: Option<&str>,
    ) -> Result<i64> {
        if name.is_empty() {
            return Err(ParamStoreError::InvalidName);
        }

        let input = PutParameterInput::builder()
            .name(name)
            .value(value)
            .r#type(ParameterType::SecureString)
            .overwrite(overwrite)
            .set_key_id(key_id.filter(|k| !k.is_empty()).map(str::to_string))
            .build()?;

        debug!(name, overwrite, custom_key = input.key_id.is_some(), "putting secure parameter");

        match self.ssm.put_parameter(input).await {
            Ok(output) => Ok(output.version),
            Err(aws_sdk_ssm::Error::ParameterAlreadyExists(_)) => {
                Err(ParamStoreError::AlreadyExists(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn checked_page_size(&self) -> Result<Option<i32>> {
        match self.page_size {
            Some(size) if !(1..=MAX_PAGE_SIZE).contains(&size) => {
                Err(ParamStoreError::InvalidRequest(BuildError::invalid_field(
                    "max_results",
                    format!("page size must be between 1 and {}, got {}", MAX_PAGE_SIZE, size),
                )))
            }
            size => Ok(size),
        }
    }
}
