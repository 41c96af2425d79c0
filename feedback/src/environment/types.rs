use feedback_core_form_impl::FormFeatureServiceImpl;
use feedback_extern_impl::FormBackendApiServiceImpl;
use feedback_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = feedback_api_rest::RestServer<FormFeature>;

// Templates
pub type Template = TemplateServiceImpl;

// Extern
pub type FormBackendApi = FormBackendApiServiceImpl;

// Core
pub type FormFeature = FormFeatureServiceImpl<FormBackendApi, Template>;
