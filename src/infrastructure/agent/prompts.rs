//! Fixed instruction templates for the agent stages
//!
//! Variables use `${name}` placeholders filled by simple substitution.

/// Binary relevance judgment, constrained to a single-key JSON object
pub const GRADE_TEMPLATE: &str = "You are a grader assessing relevance of a retrieved document to a user question.\n\
Here is the retrieved document:\n\n${document}\n\n\
Here is the user question: ${question}\n\
If the document contains keyword(s) or semantic meaning useful to the question, grade it as relevant.\n\
Give a binary score 'yes' or 'no' to indicate whether the document is relevant to the question.\n\
Provide the binary score as a JSON with a single key 'score' and no preamble or explanation.";

/// System instruction for query rewriting
pub const REFORMULATE_SYSTEM: &str = "You are a helper that re-writes questions to improve \
retrieval. Look at the input and try to reason about the underlying semantic intent / meaning.";

/// User instruction for query rewriting
pub const REFORMULATE_TEMPLATE: &str = "Here is the initial question:\n\n${question}\n\
Formulate an improved question. Output only the improved question string.";

/// Final answer generation over the (possibly empty) context
pub const GENERATE_TEMPLATE: &str = "You are an expert research assistant. Use the following \
pieces of retrieved context to answer the question. \
If you don't know the answer, just say that you don't know. \
Keep the answer technical, professional, and concise.\n\n\
Question: ${question}\n\
Context: ${context}\n\
Answer:";

/// Fill `${name}` placeholders in a template
pub fn render(template: &str, variables: &[(&str, &str)]) -> String {
    let mut rendered = template.to_string();
    for (name, value) in variables {
        rendered = rendered.replace(&format!("${{{}}}", name), value);
    }
    rendered
}
