//! Template Service - template operations against the messaging API.
//!
//! Every operation follows the same line: validate/build the request, make
//! exactly one API call, then map the response or the failure. Nothing is
//! retained between calls apart from the injected ports and the phone-number
//! id, so one service can be shared across tasks.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::{
    application::{
        ClientError, TemplateResponse,
        ports::{ApiClient, Logger, TemplateValidator},
    },
    constants::{
        DEFAULT_TEMPLATE_LIMIT, MESSAGES_PATH, MESSAGING_PRODUCT, RECIPIENT_TYPE_INDIVIDUAL,
        TEMPLATES_PATH, codes,
    },
    domain::{
        self, DomainError, DomainValidator, JsonObject, MessageResponse, Template,
        TemplateCategory, TemplateComponent,
    },
    error::{Cause, MessageError, MessageResult},
};

/// The operations offered by [`TemplateService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SendTemplate,
    GetTemplates,
    CreateTemplate,
    DeleteTemplate,
    GetTemplateDetails,
}

impl Operation {
    pub const fn name(self) -> &'static str {
        match self {
            Self::SendTemplate => "send_template",
            Self::GetTemplates => "get_templates",
            Self::CreateTemplate => "create_template",
            Self::DeleteTemplate => "delete_template",
            Self::GetTemplateDetails => "get_template_details",
        }
    }

    /// Code given to unexpected failures of this operation.
    pub const fn error_code(self) -> &'static str {
        match self {
            Self::SendTemplate => codes::SEND_TEMPLATE,
            Self::GetTemplates => codes::GET_TEMPLATES,
            Self::CreateTemplate => codes::CREATE_TEMPLATE,
            Self::DeleteTemplate => codes::DELETE_TEMPLATE,
            Self::GetTemplateDetails => codes::GET_TEMPLATE_DETAILS,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why an operation failed, before it is mapped to `MessageError`.
enum Failure {
    /// Raised locally as a domain error; surfaces unchanged.
    Domain(MessageError),
    /// Returned by the API client.
    Client(ClientError),
    /// Serialization or response-shape problems.
    Unexpected(Cause),
}

impl Failure {
    fn into_message_error(self, op: Operation) -> MessageError {
        match self {
            Self::Domain(err) => err,
            Self::Client(ClientError::Api(api)) => MessageError::from_api(api),
            Self::Client(other) => MessageError::wrap(op.error_code(), other),
            Self::Unexpected(cause) => MessageError::wrap_shared(op.error_code(), cause),
        }
    }
}

impl From<ClientError> for Failure {
    fn from(err: ClientError) -> Self {
        Self::Client(err)
    }
}

impl From<serde_json::Error> for Failure {
    fn from(err: serde_json::Error) -> Self {
        Self::Unexpected(Arc::new(err))
    }
}

impl From<DomainError> for Failure {
    fn from(err: DomainError) -> Self {
        Self::Unexpected(Arc::new(err))
    }
}

#[derive(Serialize)]
struct SendTemplateRequest<'a> {
    messaging_product: &'static str,
    recipient_type: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    template: &'a Template,
}

#[derive(Serialize)]
struct CreateTemplateRequest<'a> {
    name: &'a str,
    language: &'a str,
    category: TemplateCategory,
    components: &'a [Value],
}

/// Façade over the messaging API for template operations.
pub struct TemplateService {
    client: Box<dyn ApiClient>,
    phone_number_id: String,
    logger: Box<dyn Logger>,
    validator: Box<dyn TemplateValidator>,
}

impl TemplateService {
    /// Create a new template service.
    ///
    /// `phone_number_id` scopes every endpoint path.
    pub fn new(
        client: Box<dyn ApiClient>,
        phone_number_id: impl Into<String>,
        logger: Box<dyn Logger>,
    ) -> Self {
        Self {
            client,
            phone_number_id: phone_number_id.into(),
            logger,
            validator: Box::new(DomainValidator),
        }
    }

    /// Replace the default template validator.
    pub fn with_validator(mut self, validator: Box<dyn TemplateValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn phone_number_id(&self) -> &str {
        &self.phone_number_id
    }

    /// Send a template message to `recipient`.
    ///
    /// Invalid content fails with `MessageError::InvalidContent` before any
    /// network call is made.
    pub async fn send_template(
        &self,
        recipient: &str,
        template_name: &str,
        language: &str,
        components: Vec<TemplateComponent>,
    ) -> MessageResult<MessageResponse> {
        let template = Template::new(template_name, language).with_components(components);
        self.send(recipient, template).await
    }

    /// Send an already-built template.
    #[instrument(skip_all, fields(to = %recipient, template = %template.name))]
    pub async fn send(&self, recipient: &str, template: Template) -> MessageResult<MessageResponse> {
        self.logger.info(&format!(
            "Sending template '{}' ({}) to {}",
            template.name, template.language, recipient
        ));
        let result = self.try_send(recipient, &template).await;
        self.settle(Operation::SendTemplate, result)
    }

    /// List templates, at most `limit` of them (default 20).
    ///
    /// A response without a `data` array yields an empty list.
    #[instrument(skip_all, fields(limit = ?limit))]
    pub async fn get_templates(&self, limit: Option<u32>) -> MessageResult<Vec<JsonObject>> {
        let limit = limit.unwrap_or(DEFAULT_TEMPLATE_LIMIT);
        self.logger.info(&format!("Fetching up to {limit} templates"));
        let result = self.try_get_templates(limit).await;
        self.settle(Operation::GetTemplates, result)
    }

    /// Submit a new template for review.
    ///
    /// Every outcome, including a failed call, comes back as a
    /// [`TemplateResponse`]; use [`TemplateResponse::into_result`] to get a
    /// `Result`.
    #[instrument(skip_all, fields(name = %name, category = %category))]
    pub async fn create_template(
        &self,
        name: &str,
        language: &str,
        category: TemplateCategory,
        components: &[Value],
    ) -> TemplateResponse {
        self.logger
            .info(&format!("Creating {category} template '{name}' ({language})"));

        match self.try_create(name, language, category, components).await {
            Ok(response) => {
                if let TemplateResponse::Failure(failure) = &response {
                    self.logger.info(&format!(
                        "Template '{}' was not created: {}",
                        name, failure.error_message
                    ));
                }
                response
            }
            Err(failure) => {
                TemplateResponse::from_error(self.fail(Operation::CreateTemplate, failure))
            }
        }
    }

    /// Delete every language version of a template.
    ///
    /// Returns `true` once the call completes; the response body is not
    /// inspected.
    #[instrument(skip_all, fields(name = %template_name))]
    pub async fn delete_template(&self, template_name: &str) -> MessageResult<bool> {
        self.logger
            .info(&format!("Deleting template '{template_name}'"));
        let result = self.try_delete(template_name).await;
        self.settle(Operation::DeleteTemplate, result)
    }

    /// Fetch one template by name.
    ///
    /// Fails with `MessageError::TemplateNotFound` when the listing is empty.
    #[instrument(skip_all, fields(name = %template_name))]
    pub async fn get_template_details(&self, template_name: &str) -> MessageResult<JsonObject> {
        self.logger
            .info(&format!("Fetching details of template '{template_name}'"));
        let result = self.try_get_details(template_name).await;
        self.settle(Operation::GetTemplateDetails, result)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    async fn try_send(&self, recipient: &str, template: &Template) -> Result<MessageResponse, Failure> {
        self.validator
            .validate(template)
            .map_err(|e| Failure::Domain(e.into()))?;

        let body = serde_json::to_value(SendTemplateRequest {
            messaging_product: MESSAGING_PRODUCT,
            recipient_type: RECIPIENT_TYPE_INDIVIDUAL,
            to: recipient,
            kind: "template",
            template,
        })?;

        let path = self.endpoint(MESSAGES_PATH);
        self.logger.debug(&format!("POST {path}"));
        let raw = self.client.post(&path, &body).await?;

        Ok(MessageResponse::from_json(raw)?)
    }

    async fn try_get_templates(&self, limit: u32) -> Result<Vec<JsonObject>, Failure> {
        let path = self.endpoint(TEMPLATES_PATH);
        let query = [("limit".to_string(), limit.to_string())];
        self.logger.debug(&format!("GET {path}?limit={limit}"));
        let raw = self.client.get(&path, &query).await?;

        Ok(domain::template_entries(raw)?)
    }

    async fn try_create(
        &self,
        name: &str,
        language: &str,
        category: TemplateCategory,
        components: &[Value],
    ) -> Result<TemplateResponse, Failure> {
        let body = serde_json::to_value(CreateTemplateRequest {
            name,
            language,
            category,
            components,
        })?;

        let path = self.endpoint(TEMPLATES_PATH);
        self.logger.debug(&format!("POST {path}"));
        let raw = match self.client.post(&path, &body).await? {
            Value::Object(map) => map,
            // neither `id` nor `error`: reported as an invalid response
            _ => JsonObject::new(),
        };

        Ok(TemplateResponse::from_json(raw))
    }

    async fn try_delete(&self, template_name: &str) -> Result<bool, Failure> {
        let path = self.endpoint(TEMPLATES_PATH);
        let query = [("name".to_string(), template_name.to_string())];
        self.logger.debug(&format!("DELETE {path}?name={template_name}"));
        self.client.delete(&path, &query).await?;
        Ok(true)
    }

    async fn try_get_details(&self, template_name: &str) -> Result<JsonObject, Failure> {
        let path = self.endpoint(TEMPLATES_PATH);
        let query = [("name".to_string(), template_name.to_string())];
        self.logger.debug(&format!("GET {path}?name={template_name}"));
        let raw = self.client.get(&path, &query).await?;

        domain::first_template(raw)?
            .ok_or_else(|| Failure::Domain(MessageError::template_not_found(template_name)))
    }

    fn endpoint(&self, segment: &str) -> String {
        format!("/{}/{}", self.phone_number_id, segment)
    }

    fn settle<T>(&self, op: Operation, result: Result<T, Failure>) -> MessageResult<T> {
        result.map_err(|failure| self.fail(op, failure))
    }

    fn fail(&self, op: Operation, failure: Failure) -> MessageError {
        let err = failure.into_message_error(op);
        self.logger
            .error(&format!("{op} failed [{}]", err.code()), &err);
        err
    }
}
