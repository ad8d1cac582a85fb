use crate::config::StoreConfig;
use aws_sdk_ssm::Client;
use aws_sdk_ssm::operation::get_parameter::{GetParameterInput, GetParameterOutput};
use aws_sdk_ssm::operation::get_parameters_by_path::{
    GetParametersByPathInput, GetParametersByPathOutput,
};
use aws_sdk_ssm::operation::put_parameter::{PutParameterInput, PutParameterOutput};
use std::future::Future;

/// The three Parameter Store operations the gateway needs.
///
/// Implemented for [`aws_sdk_ssm::Client`]; tests substitute a scripted stub.
pub trait SsmApi {
    fn get_parameters_by_path(
        &self,
        input: GetParametersByPathInput,
    ) -> impl Future<Output = Result<GetParametersByPathOutput, aws_sdk_ssm::Error>> + Send;

    fn get_parameter(
        &self,
        input: GetParameterInput,
    ) -> impl Future<Output = Result<GetParameterOutput, aws_sdk_ssm::Error>> + Send;

    fn put_parameter(
        &self,
        input: PutParameterInput,
    ) -> impl Future<Output = Result<PutParameterOutput, aws_sdk_ssm::Error>> + Send;
}

impl SsmApi for Client {
    async fn get_parameters_by_path(
        &self,
        input: GetParametersByPathInput,
    ) -> Result<GetParametersByPathOutput, aws_sdk_ssm::Error> {
        self.get_parameters_by_path()
            .set_path(input.path)
            .set_recursive(input.recursive)
            .set_parameter_filters(input.parameter_filters)
            .set_with_decryption(input.with_decryption)
            .set_max_results(input.max_results)
            .set_next_token(input.next_token)
            .send()
            .await
            .map_err(aws_sdk_ssm::Error::from)
    }

    async fn get_parameter(
        &self,
        input: GetParameterInput,
    ) -> Result<GetParameterOutput, aws_sdk_ssm::Error> {
        self.get_parameter()
            .set_name(input.name)
            .set_with_decryption(input.with_decryption)
            .send()
            .await
            .map_err(aws_sdk_ssm::Error::from)
    }

    async fn put_parameter(
        &self,
        input: PutParameterInput,
    ) -> Result<PutParameterOutput, aws_sdk_ssm::Error> {
        self.put_parameter()
            .set_name(input.name)
            .set_description(input.description)
            .set_value(input.value)
            .set_type(input.r#type)
            .set_key_id(input.key_id)
            .set_overwrite(input.overwrite)
            .set_tier(input.tier)
            .set_allowed_pattern(input.allowed_pattern)
            .set_policies(input.policies)
            .set_data_type(input.data_type)
            .set_tags(input.tags)
            .send()
            .await
            .map_err(aws_sdk_ssm::Error::from)
    }
}

/// Initialize AWS SSM client with the default credential provider chain
///
/// This will try to load credentials from:
/// 1. Environment variables (AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY)
/// 2. ~/.aws/credentials file
/// 3. IAM role (when running on EC2, ECS, Lambda, etc.)
pub async fn create_ssm_client(config: &StoreConfig) -> Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(region) = &config.region {
        loader = loader.region(aws_sdk_ssm::config::Region::new(region.clone()));
    }

    Client::new(&loader.load().await)
}
