//! Request and response types exchanged with the API worker.
//!
//! Requests carry the tracing context of the event that produced them, so the
//! HTTP spans recorded on the worker nest under that event in the exported
//! trace.

use crate::domain::{Credentials, MovieId};
use crate::form::MovieSubmission;
use crate::store::{CatalogOutcome, Ticket};

/// OpenTelemetry identifiers of the span that dispatched a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// Trace ID as a 32 character hex string.
    pub trace_id: String,

    /// Span ID of the dispatching span as a 16 character hex string.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry context of the current span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span is
    /// not sampled.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        span_context.is_valid().then(|| Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Rebuilds a remote parent context from the captured identifiers.
    #[must_use]
    pub fn to_otel_context(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;
        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );
        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }
}

/// Generates constructors that attach the current trace context.
macro_rules! api_request_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl ApiRequest {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " request with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

api_request_builders! {
    fetch_movies(FetchMovies { ticket: Ticket }),
    create_movie(CreateMovie { ticket: Ticket, submission: MovieSubmission }),
    update_movie(UpdateMovie { ticket: Ticket, id: MovieId, submission: MovieSubmission }),
    delete_movie(DeleteMovie { ticket: Ticket, id: MovieId }),
    login(Login { attempt: u64, credentials: Credentials }),
    signup(Signup { attempt: u64, credentials: Credentials }),
}

/// Work posted to the API worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    /// `GET /movies`.
    FetchMovies {
        ticket: Ticket,
        trace_context: Option<TraceContext>,
    },

    /// `POST /movies`.
    CreateMovie {
        ticket: Ticket,
        submission: MovieSubmission,
        trace_context: Option<TraceContext>,
    },

    /// `PUT /movies/:id`.
    UpdateMovie {
        ticket: Ticket,
        id: MovieId,
        submission: MovieSubmission,
        trace_context: Option<TraceContext>,
    },

    /// `DELETE /movies/:id`.
    DeleteMovie {
        ticket: Ticket,
        id: MovieId,
        trace_context: Option<TraceContext>,
    },

    /// `POST /auth/login`.
    Login {
        attempt: u64,
        credentials: Credentials,
        trace_context: Option<TraceContext>,
    },

    /// `POST /auth/sign-up`.
    Signup {
        attempt: u64,
        credentials: Credentials,
        trace_context: Option<TraceContext>,
    },
}

impl ApiRequest {
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::FetchMovies { trace_context, .. }
            | Self::CreateMovie { trace_context, .. }
            | Self::UpdateMovie { trace_context, .. }
            | Self::DeleteMovie { trace_context, .. }
            | Self::Login { trace_context, .. }
            | Self::Signup { trace_context, .. } => trace_context.as_ref(),
        }
    }

    /// Short name for spans and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FetchMovies { .. } => "fetch_movies",
            Self::CreateMovie { .. } => "create_movie",
            Self::UpdateMovie { .. } => "update_movie",
            Self::DeleteMovie { .. } => "delete_movie",
            Self::Login { .. } => "login",
            Self::Signup { .. } => "signup",
        }
    }
}

/// Results sent back by the API worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse {
    /// A catalog request finished; fold `outcome` in with `ticket`.
    Catalog {
        ticket: Ticket,
        outcome: CatalogOutcome,
    },

    /// Login or sign-up succeeded.
    Authenticated {
        attempt: u64,
        token: String,
    },

    /// Login or sign-up was refused or failed.
    AuthFailed {
        attempt: u64,
        message: String,
    },
}
