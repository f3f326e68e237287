//! Persona for the in-app assistant
//!
//! The assistant is scoped to BrasilConnect and always answers in
//! Brazilian Portuguese.

const PERSONA: &str = "Você é o assistente inteligente do BrasilConnect.";

const PRODUCT: &str = "O BrasilConnect é um app que fornece números virtuais brasileiros \
(DDD 11) para pessoas que não podem comprar um chip físico.";

/// Duties listed to the model, in order
const DUTIES: &[&str] = &[
    "Ajudar usuários a configurar o WhatsApp com o número virtual.",
    "Explicar como ganhar créditos vendo anúncios.",
    "Resolver dúvidas técnicas sobre chamadas e SMS.",
];

const TONE: &str = "Responda sempre em Português do Brasil, de forma amigável e empática.";

/// Build the system instruction sent with every assistant request
pub fn build_system_prompt() -> String {
    let duties = DUTIES
        .iter()
        .enumerate()
        .map(|(i, duty)| format!("{}. {duty}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{PERSONA}\n{PRODUCT}\nSuas funções:\n{duties}\n{TONE}")
}
