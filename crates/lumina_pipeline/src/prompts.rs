//! Prompt templates for every generation step.
//!
//! Inputs are truncated to fixed character budgets before interpolation so
//! a long page or insight never blows past the model's context.

use lumina_core::truncate_chars;

/// Characters of scraped text sent to the insight prompt.
pub const INSIGHT_CONTENT_LIMIT: usize = 15_000;
/// Characters of insight text sent to the script prompt.
pub const SCRIPT_CONTENT_LIMIT: usize = 5_000;
/// Characters of combined insights sent to the consolidation prompt.
pub const CONSOLIDATION_CONTENT_LIMIT: usize = 50_000;
/// Characters of insight text sent to the pill prompts.
pub const PILL_CONTENT_LIMIT: usize = 5_000;
/// Characters of consolidated context appended to script and pill prompts.
pub const CONTEXT_LIMIT: usize = 3_000;
/// Characters of pill text described to the image model.
pub const INFOGRAPHIC_TEXT_LIMIT: usize = 500;

/// Insight document from the raw text of a web page.
pub fn insight_prompt(url: &str, raw_text: &str) -> String {
    format!(
        "Você é um especialista em educação digital para idosos.
Analise o texto abaixo extraído do site {url}.

Crie um arquivo Markdown (.md) contendo:
1. Título, numa linha iniciada por \"# \".
2. Principais tópicos.
3. Principais insights.
4. Sinais de Alerta (se for golpe) ou Dica de Ouro.
5. Um breve resumo.

Texto bruto:
{text}
",
        url = url,
        text = truncate_chars(raw_text, INSIGHT_CONTENT_LIMIT),
    )
}

/// Single consolidated document from every insight of a run.
pub fn consolidation_prompt(all_insights: &str) -> String {
    format!(
        "Você é um especialista em educação digital para idosos.

Abaixo estão diversos insights educativos sobre segurança digital e uso de tecnologia para idosos.
Consolide todo esse conhecimento em um único documento Markdown estruturado:

# Consolidado de Insights - Educação Digital para Idosos

## 1. Principais Temas Abordados
## 2. Pontos-Chave de Aprendizado
## 3. Principais Golpes e Como se Proteger
## 4. Principais Dicas Práticas de Segurança
## 5. Principais Sinais de Alerta
## 6. Resumo Executivo

Insights para consolidar:
{insights}
",
        insights = truncate_chars(all_insights, CONSOLIDATION_CONTENT_LIMIT),
    )
}

fn context_block(context: Option<&str>, heading: &str, instruction: &str) -> String {
    match context.map(str::trim).filter(|c| !c.is_empty()) {
        Some(context) => format!(
            "\n{}:\n{}\n{}\n",
            heading,
            instruction,
            truncate_chars(context, CONTEXT_LIMIT)
        ),
        None => String::new(),
    }
}

/// Multi-scene video script from an insight.
///
/// Every scene is a `## Cena N` section with a visual description and a
/// narration line, the layout the scene parser reads back.
pub fn script_prompt(insight: &str, context: Option<&str>, scene_count: usize) -> String {
    let scene_count = scene_count.max(1);
    let scenes: String = (1..=scene_count)
        .map(|n| format!("## Cena {}\n- Descrição visual:\n- Locução:\n\n", n))
        .collect();

    format!(
        "Você é um roteirista especializado em criar conteúdo educativo para idosos.

Com base no seguinte conteúdo educativo:
{insight}
{context}
Crie um ROTEIRO DE VÍDEO com exatamente {count} cenas de cerca de 8 segundos cada, neste formato:

# Roteiro: <título>

{scenes}Cada descrição visual deve ser autossuficiente, literal e filmável, sem texto na tela.
Mantenha a linguagem simples, acessível e clara para idosos.
",
        insight = truncate_chars(insight, SCRIPT_CONTENT_LIMIT),
        context = context_block(
            context,
            "CONTEXTO ADICIONAL (Consolidado de Insights)",
            "Use este contexto para enriquecer o roteiro com informações relevantes e consistentes:"
        ),
        count = scene_count,
        scenes = scenes,
    )
}

/// Short imperative title for a knowledge pill.
pub fn pill_title_prompt(insight: &str) -> String {
    format!(
        "Voce e um especialista em educacao digital para idosos.

Com base no seguinte conteudo educativo:
{insight}

Crie um TITULO CURTO para uma pilula de conhecimento.

REGRAS:
1. Maximo 6-8 palavras
2. Comece com verbo no imperativo (Como, Aprenda, Proteja, Evite, etc.)
3. Linguagem simples, sem termos tecnicos

FORMATO:
Retorne APENAS o titulo, sem aspas ou formatacao.

Titulo:",
        insight = truncate_chars(insight, PILL_CONTENT_LIMIT),
    )
}

/// Two to four sentence explanation for a knowledge pill.
pub fn pill_short_text_prompt(insight: &str, context: Option<&str>) -> String {
    format!(
        "Voce e um especialista em educacao digital para idosos e pessoas neurodivergentes.

Com base no seguinte conteudo educativo:
{insight}
{context}
Crie um TEXTO CURTO (pilula de conhecimento) seguindo estas regras:

1. Maximo 3-4 frases curtas
2. Linguagem simples, sem termos tecnicos
3. Use verbos no imperativo (Faca, Evite, Desconfie, etc.)
4. Inclua uma acao pratica que a pessoa pode fazer
5. Seja literal e direto, sem metaforas abstratas

Retorne APENAS o texto da pilula, sem titulos ou formatacao markdown.",
        insight = truncate_chars(insight, PILL_CONTENT_LIMIT),
        context = context_block(
            context,
            "ADDITIONAL CONTEXT (Consolidated Insights)",
            "Use this context to ensure consistency with other educational content:"
        ),
    )
}

/// Reflective call-to-action question closing a knowledge pill.
pub fn pill_call_to_action_prompt(short_text: &str, topic: &str) -> String {
    format!(
        "Voce e um educador especializado em idosos e pessoas neurodivergentes.

TOPICO: {topic}

TEXTO DA PILULA:
{short_text}

Crie UMA pergunta de chamada para acao:
1. Simples e direta, respondida com \"sim\", \"nao\" ou uma reflexao pessoal
2. Conecta o tema com a vida real da pessoa
3. Nao exige conhecimento tecnico

Retorne APENAS a pergunta, sem explicacoes adicionais.

Pergunta:"
    )
}

/// Image prompt for an accessibility-focused infographic.
pub fn infographic_prompt(topic: &str, short_text: &str) -> String {
    format!(
        "Create an educational infographic about: {topic}

Key message: {message}

Style requirements for accessibility:
- Simple, literal illustrations (no abstract metaphors)
- Large, clear icons and symbols (minimum 3 main visual elements)
- High contrast: dark elements on a light background (#FFF or #F5F5DC)
- Soft, calming color palette: blues (#4A90D9), greens (#7CB342), warm yellows (#FFD54F)
- NO text in the image
- Clean, uncluttered flat layout with generous whitespace
- Suitable for elderly and neurodivergent audiences
- Show positive outcomes and safe behaviors, not scary scenarios",
        topic = topic,
        message = truncate_chars(short_text, INFOGRAPHIC_TEXT_LIMIT),
    )
}

/// Strip whitespace and surrounding quote characters from a generated line.
pub fn clean_generated(text: &str) -> String {
    text.trim()
        .trim_matches(|c| matches!(c, '"' | '\'' | '“' | '”'))
        .trim()
        .to_string()
}
