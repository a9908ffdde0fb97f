//! Per-stage prompt construction.
//!
//! Fixed instruction text lives here; everything interpolated (capability
//! fields, generated code, fetched pages) goes through the builder's opaque
//! `value`/`values` calls and is never re-parsed.

use crate::agent::{Prompt, PromptBuilder};
use crate::models::CapabilityFields;

const INTEGRATOR: &str = "You are an expert third-party API integration developer, code specialist";

pub fn doc_review(docslink: &str) -> Prompt {
    PromptBuilder::new(INTEGRATOR)
        .value("1. Review the API provider docs here", docslink)
        .line(
            "2. Return the Payload / request body schema object required for the request, \
             only include the required body parameters and the data structure. Note on each \
             field when it is required.",
        )
        .line("3. Also return the Response data object and its data structure.")
        .build()
}

pub fn backend(caps: &CapabilityFields) -> Prompt {
    PromptBuilder::new(
        "You are an expert third-party API integration developer, your mission is to \
         generate a backend route in Python.",
    )
    .line("# Start your response with a comment and end your response with a comment.")
    .line("Create a backend route that acts as an API proxy.")
    .line("Do not use the provider docs, only use the data provided below for this request:")
    .values("Route name", &caps.route_names)
    .line("Do not hardcode the payload.")
    .values("Headers", &caps.headers)
    .values("Endpoint url", &caps.end_points)
    .values("Consider the error logging if required", &caps.error_bodies)
    .line("Handle the response.")
    .line("Ensure you handle allow all CORS.")
    .line("Use a flask app that will host this backend locally on port 5000.")
    .line("Add print statements for errors and the response.")
    .line("Be concise, only respond with the code.")
    .build()
}

pub fn ui(caps: &CapabilityFields) -> Prompt {
    PromptBuilder::new(
        "You are an expert third-party API integration developer, your mission is to \
         generate required frontend UI elements in React.",
    )
    .line("// Start your response with a comment and end your response with a comment.")
    .line(
        "Create for me frontend react UI elements such as form fields (e.g. buttons, \
         text fields, etc) and the display areas for the API responses.",
    )
    .line("Do not use the provider docs, only use the data provided below for this request:")
    .values(
        "See the required request payload object parameters to know what input fields are needed",
        &caps.request_bodies,
    )
    .values(
        "Follow this guidance on how to use the request fields",
        &caps.request_guidance,
    )
    .values(
        "Structure the response according to the response data object",
        &caps.response_bodies,
    )
    .values(
        "Follow this advice to structure the response properly",
        &caps.response_guidance,
    )
    .line("Keep all frontend code in a single component.")
    .line("No dummy data.")
    .line("Create the required state fields.")
    .line("Only return React code. Be concise.")
    .build()
}

pub fn request_handler(backend_code: &str, ui_code: &str, caps: &CapabilityFields) -> Prompt {
    PromptBuilder::new(
        "You are an expert third-party API integration developer, your mission is to \
         generate a frontend API request handler in React.",
    )
    .line(
        "// Note: Start your response with a comment (using '//') and also end your \
         response with a comment (using '//').",
    )
    .value(
        "Generate React code for the frontend API request handler that will handle the \
         request and response to the backend we have defined here",
        backend_code,
    )
    .line("Do not use the provider docs, only use the data provided below for this request:")
    .value(
        "See the UI fields we have here and write the API request handler to handle them",
        ui_code,
    )
    .values(
        "See the required request payload object parameters",
        &caps.request_bodies,
    )
    .values(
        "Follow this guidance on how to use the request fields",
        &caps.request_guidance,
    )
    .values(
        "Structure the response fields according to the response data object",
        &caps.response_bodies,
    )
    .values(
        "Follow this advice to structure the response properly",
        &caps.response_guidance,
    )
    .line("Return to me the code updated with the frontend API request handler component.")
    .line("Do not hardcode the request fields, expect to receive it from the input fields.")
    .line("Keep all frontend code in a single component.")
    .values("Route name", &caps.route_names)
    .line("Assume the backend will be hosted on http://localhost:5000/.")
    .line("Only return React code. Use fetch instead of axios. Be concise.")
    .build()
}

pub fn integration_tests(handler_code: &str, backend_code: &str, docslink: &str) -> Prompt {
    PromptBuilder::new(
        "You are an expert third-party API integrator focusing on quality assurance.",
    )
    .line(
        "Your task now is to create backend integration tests, in the same language as \
         the provided backend code, for the API provider based on the integration \
         requirements identified in the previous steps.",
    )
    .line(
        "Consider the functionalities proposed for integration and ensure the tests \
         cover these functionalities effectively.",
    )
    .line("Write the code for the integration tests, nothing else, literally.")
    .value("Integration actions", handler_code)
    .value("Backend endpoint", backend_code)
    .value("Documentation link", docslink)
    .build()
}

pub fn review(frontend_code: &str, caps: &CapabilityFields) -> Prompt {
    PromptBuilder::new(
        "You are an expert third-party API integration developer, your mission is to \
         generate a working react file.",
    )
    .value("Review the code at", frontend_code)
    .line("Do not remove any existing code.")
    .line("No dummy data.")
    .values(
        "Add field validation and error logging where possible",
        &caps.error_bodies,
    )
    .line("Do not change anything besides field validation.")
    .line(
        "Ensure the code is ready for production use with all required React boilerplate \
         and no hardcoding.",
    )
    .build()
}

pub fn styling(frontend_code: &str, page_contents: &str) -> Prompt {
    PromptBuilder::new(
        "You are an expert third-party API integration developer, your mission is to \
         style the frontend code.",
    )
    .value("Review the new code at", frontend_code)
    .value("Review the existing page", page_contents)
    .line("Add inline styling to new code to match the styling patterns from the existing page.")
    .line("Do not remove any code.")
    .line("No dummy data.")
    .build()
}

pub fn documentation(backend_code: &str, frontend_code: &str, docslink: &str) -> Prompt {
    PromptBuilder::new("You are a third-party API integration documentation expert.")
        .line("Write documentation for the following integration.")
        .value("1. Backend endpoint", backend_code)
        .value("2. Frontend component", frontend_code)
        .value("3. API Provider docs", docslink)
        .line(
            "It should contain the following sections: Quick start guide, testing options \
             (note that we have written tests at integration_tests.py), troubleshooting \
             guide, support contact info, links to API provider docs.",
        )
        .build()
}

pub fn api_keys(docslink: &str) -> Prompt {
    PromptBuilder::new(
        "You are an expert third-party API integration developer helping a user acquire \
         provider API keys.",
    )
    .value(
        "1. Search the API providers link and learn their process for getting and using \
         the API key",
        docslink,
    )
    .line(
        "2. Provide the steps for me to get and add the API key in my project in a list \
         format. I'm only concerned about the actual API key, nothing else.",
    )
    .line("Include full URLs if they are available for the steps.")
    .build()
}
