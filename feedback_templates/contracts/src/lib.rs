use serde::Serialize;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateService: Send + Sync + 'static {
    /// Render the given template.
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String>;
}

#[cfg(feature = "mock")]
impl MockTemplateService {
    pub fn with_render<T: Template + Send + PartialEq + std::fmt::Debug + 'static>(
        mut self,
        template: T,
        result: String,
    ) -> Self {
        self.expect_render()
            .once()
            .with(mockall::predicate::eq(template))
            .return_once(|_| Ok(result));
        self
    }
}

pub trait Template: Serialize {
    /// Name of the template file. Must end with `.html` so that values are
    /// escaped when rendered.
    const NAME: &'static str;
    const TEMPLATE: &'static str;
}

pub const BASE_TEMPLATE: (&str, &str) = ("base.html", include_str!("../templates/base.html"));

macro_rules! templates {
    ($( $ident:ident ( $path:literal ), )* ) => {
        $(
            impl Template for $ident {
                const NAME: &'static str = $path;
                const TEMPLATE: &'static str = include_str!(concat!("../templates/", $path));
            }
        )*

        pub const TEMPLATES: &[(&str, &str)] = &[
            $( ($ident::NAME, $ident::TEMPLATE) ),*
        ];
    };
}

templates! {
    FeedbackPageTemplate("feedback.html"),
}

/// The feedback page in one submission state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackPageTemplate {
    pub title: String,
    pub owner_name: String,
    pub homepage: String,
    /// Hidden context field that is posted back with the form.
    pub product: String,
    pub succeeded: bool,
    /// Show the banner with the fallback contact address.
    pub failed: bool,
    pub fallback_contact: String,
    /// Name of the hidden honeypot input, if the backend uses one.
    pub honeypot_name: Option<String>,
    pub values: FeedbackPageValues,
    pub errors: FeedbackPageErrors,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedbackPageValues {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Validation messages with their field label as prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedbackPageErrors {
    pub name: Vec<String>,
    pub email: Vec<String>,
    pub message: Vec<String>,
    /// Messages that are not bound to one of the inputs.
    pub form: Vec<String>,
}
