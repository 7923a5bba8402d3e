//! Creature Battle Engine MCP Server
//!
//! A Model Context Protocol server over stdio that exposes the battle and
//! progression resolvers as stateless tools. Every call carries its full input;
//! nothing is kept between calls.

use std::borrow::Cow;
use std::path::PathBuf;

use clap::Parser;
use creature_battle::battle::rng::{RandomSource, SeededRandom, ThreadRandom};
use creature_battle::combatant::{
    effectiveness_of_tags, parse_element, parse_elements, parse_rarity,
};
use creature_battle::progression::experience::stat_at_level;
use creature_battle::{
    narrate, rank_moves, BaseStats, Combatant, DailyChallenge, Engine, EngineConfig,
    FallbackNarrator, MoveDescriptor, NarrativeRequest, ObjectiveKind, Quest, Rarity,
    ValidationError,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, *},
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::str::FromStr;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

/// Creature battle engine tool server
#[derive(Parser, Debug)]
#[command(name = "engine-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RON engine config (default: built-in rules)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter directives, e.g. "creature_battle=trace" (default: RUST_LOG, then info)
    #[arg(long)]
    log_filter: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EngineService {
    tool_router: ToolRouter<EngineService>,
    engine: Engine,
}

// Tool request structures
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CombatantRequest {
    #[schemars(description = "Display name, used only in commentary")]
    pub name: Option<String>,
    #[schemars(description = "Level (1-100)")]
    pub level: u8,
    pub health: u8,
    pub attack: u8,
    pub defense: u8,
    pub speed: u8,
    #[schemars(description = "One or two element tags, e.g. [\"rock\", \"ground\"]")]
    pub elements: Vec<String>,
    #[schemars(description = "common, uncommon, rare or legendary (default: common)")]
    pub rarity: Option<String>,
}

impl CombatantRequest {
    fn into_combatant(self, field: &'static str) -> Result<Combatant, ValidationError> {
        let elements = parse_elements(field, &self.elements)?;
        let rarity = match self.rarity.as_deref() {
            Some(tag) => parse_rarity(tag)?,
            None => Rarity::Common,
        };
        let stats = BaseStats {
            health: self.health,
            attack: self.attack,
            defense: self.defense,
            speed: self.speed,
        };
        let combatant = Combatant::new(self.level, stats, elements, rarity);
        Ok(match self.name {
            Some(name) => combatant.with_name(name),
            None => combatant,
        })
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MoveRequest {
    pub name: String,
    #[schemars(description = "Element tag of the move, e.g. \"water\"")]
    pub element: String,
    #[schemars(description = "Base power (0-250)")]
    pub power: u16,
    #[schemars(description = "Accuracy in [0, 1] (default: 1.0)")]
    pub accuracy: Option<f64>,
}

impl MoveRequest {
    fn into_move(self) -> Result<MoveDescriptor, ValidationError> {
        let element = parse_element(&self.element)?;
        let mut descriptor = MoveDescriptor::new(self.name, element, self.power);
        if let Some(accuracy) = self.accuracy {
            descriptor.accuracy = accuracy;
        }
        Ok(descriptor)
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ResolveDamageRequest {
    pub attacker: CombatantRequest,
    pub defender: CombatantRequest,
    #[serde(rename = "move")]
    #[schemars(description = "The move being used; it is assumed to have hit")]
    pub move_used: MoveRequest,
    #[schemars(description = "Seed for reproducible rolls (default: random)")]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ResolveCaptureRequest {
    #[schemars(description = "common, uncommon, rare or legendary")]
    pub rarity: String,
    #[schemars(description = "Remaining health as a fraction in [0, 1]")]
    pub health_fraction: f64,
    #[schemars(description = "Seed for reproducible rolls (default: random)")]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AwardExperienceRequest {
    pub winner_level: u8,
    pub loser_level: u8,
    #[schemars(description = "Winner's experience before the battle (default: 0)")]
    pub current_experience: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct StatAtLevelRequest {
    #[schemars(description = "Base stat (1-255)")]
    pub base_stat: u8,
    #[schemars(description = "Level (1-100)")]
    pub level: u8,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AdvanceQuestRequest {
    #[schemars(description = "The quest as previously returned by the engine")]
    pub quest: Value,
    #[schemars(description = "battle, capture, hatch or trade")]
    pub kind: String,
    pub increment: u32,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AdvanceChallengeRequest {
    #[schemars(description = "The daily challenge as previously returned by the engine")]
    pub challenge: Value,
    pub increment: u32,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DailyChallengesRequest {
    #[schemars(description = "Prefix for challenge ids, e.g. the date")]
    pub id_prefix: String,
    #[schemars(description = "Seed for reproducible picks (default: random)")]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RankMovesRequest {
    pub moves: Vec<MoveRequest>,
    #[schemars(description = "Element tags of the opposing creature")]
    pub opponent_elements: Vec<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EffectivenessRequest {
    #[schemars(description = "Element tag of the attacking move, e.g. \"electric\"")]
    pub attack_element: String,
    #[schemars(description = "One or two element tags of the defender")]
    pub defender_elements: Vec<String>,
}

fn invalid_params(err: ValidationError) -> McpError {
    tracing::debug!(field = err.field(), error = %err, "rejected tool input");
    McpError {
        code: ErrorCode(-32602),
        message: Cow::from(format!("invalid {}: {}", err.field(), err)),
        data: None,
    }
}

fn malformed(field: &str, err: serde_json::Error) -> McpError {
    McpError {
        code: ErrorCode(-32602),
        message: Cow::from(format!("invalid {}: {}", field, err)),
        data: None,
    }
}

fn json_result(value: &impl Serialize) -> Result<CallToolResult, McpError> {
    match serde_json::to_string_pretty(value) {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(e) => Err(McpError {
            code: ErrorCode(-32603),
            message: Cow::from(format!("Error encoding result: {}", e)),
            data: None,
        }),
    }
}

fn random_source(seed: Option<u64>) -> Box<dyn RandomSource + Send> {
    match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    }
}

#[tool_router]
impl EngineService {
    pub fn new(engine: Engine) -> Self {
        Self {
            tool_router: Self::tool_router(),
            engine,
        }
    }

    #[tool(description = "Resolve the damage a move deals from one creature to another")]
    async fn resolve_damage(
        &self,
        Parameters(request): Parameters<ResolveDamageRequest>,
    ) -> Result<CallToolResult, McpError> {
        let attacker = request
            .attacker
            .into_combatant("attacker.elements")
            .map_err(invalid_params)?;
        let defender = request
            .defender
            .into_combatant("defender.elements")
            .map_err(invalid_params)?;
        let move_used = request.move_used.into_move().map_err(invalid_params)?;

        let mut rng = random_source(request.seed);
        let outcome = self
            .engine
            .damage()
            .resolve(&attacker, &defender, &move_used, rng.as_mut())
            .map_err(invalid_params)?;

        let commentary = NarrativeRequest::commentary(&attacker, &defender, &move_used, &outcome);
        json_result(&json!({
            "outcome": outcome,
            "commentary": narrate(&FallbackNarrator, &commentary),
        }))
    }

    #[tool(description = "Attempt to capture a wild creature")]
    async fn resolve_capture(
        &self,
        Parameters(request): Parameters<ResolveCaptureRequest>,
    ) -> Result<CallToolResult, McpError> {
        let rarity = parse_rarity(&request.rarity).map_err(invalid_params)?;
        let mut rng = random_source(request.seed);
        let outcome = self
            .engine
            .capture()
            .resolve(rarity, request.health_fraction, rng.as_mut())
            .map_err(invalid_params)?;
        json_result(&outcome)
    }

    #[tool(description = "Award experience for a win and report whether the winner levels up")]
    async fn award_experience(
        &self,
        Parameters(request): Parameters<AwardExperienceRequest>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = self
            .engine
            .progression()
            .apply_victory(
                request.current_experience.unwrap_or(0),
                request.winner_level,
                request.loser_level,
            )
            .map_err(invalid_params)?;
        json_result(&outcome)
    }

    #[tool(description = "Compute a stat value from its base stat at a given level")]
    async fn stat_at_level(
        &self,
        Parameters(request): Parameters<StatAtLevelRequest>,
    ) -> Result<CallToolResult, McpError> {
        let value = stat_at_level(request.base_stat, request.level).map_err(invalid_params)?;
        json_result(&json!({ "value": value }))
    }

    #[tool(description = "Record progress on a quest's objectives of one kind")]
    async fn advance_quest(
        &self,
        Parameters(request): Parameters<AdvanceQuestRequest>,
    ) -> Result<CallToolResult, McpError> {
        let quest: Quest =
            serde_json::from_value(request.quest).map_err(|e| malformed("quest", e))?;
        quest.validate().map_err(invalid_params)?;
        let kind = ObjectiveKind::from_str(request.kind.trim())
            .map_err(|_| invalid_params(ValidationError::UnknownObjectiveKind(request.kind)))?;

        let quest = self.engine.quests().advance_quest(quest, kind, request.increment);
        json_result(&json!({
            "complete": quest.is_complete(),
            "quest": quest,
        }))
    }

    #[tool(description = "Record progress on a daily challenge")]
    async fn advance_challenge(
        &self,
        Parameters(request): Parameters<AdvanceChallengeRequest>,
    ) -> Result<CallToolResult, McpError> {
        let challenge: DailyChallenge =
            serde_json::from_value(request.challenge).map_err(|e| malformed("challenge", e))?;
        challenge.validate().map_err(invalid_params)?;

        let challenge = self
            .engine
            .quests()
            .advance_challenge(challenge, request.increment);
        json_result(&json!({
            "complete": challenge.is_complete(),
            "challenge": challenge,
        }))
    }

    #[tool(description = "Draw today's easy, medium and hard challenges")]
    async fn daily_challenges(
        &self,
        Parameters(request): Parameters<DailyChallengesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut rng = random_source(request.seed);
        let challenges = self
            .engine
            .quests()
            .daily_challenges(&request.id_prefix, rng.as_mut());
        json_result(&challenges)
    }

    #[tool(description = "Look up the type-effectiveness multiplier of an attack element")]
    async fn effectiveness(
        &self,
        Parameters(request): Parameters<EffectivenessRequest>,
    ) -> Result<CallToolResult, McpError> {
        let multiplier = effectiveness_of_tags(
            &request.attack_element,
            "defender_elements",
            &request.defender_elements,
        )
        .map_err(invalid_params)?;
        json_result(&json!({ "multiplier": multiplier }))
    }

    #[tool(description = "Pick the strongest move against an opponent's elements")]
    async fn rank_moves(
        &self,
        Parameters(request): Parameters<RankMovesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let opponent = parse_elements("opponent_elements", &request.opponent_elements)
            .map_err(invalid_params)?;
        let moves = request
            .moves
            .into_iter()
            .map(MoveRequest::into_move)
            .collect::<Result<Vec<_>, _>>()
            .map_err(invalid_params)?;

        let chosen = rank_moves(&moves, &opponent)
            .cloned()
            .unwrap_or_else(MoveDescriptor::tackle);
        json_result(&chosen)
    }
}

#[tool_handler]
impl ServerHandler for EngineService {}

fn init_logging(directives: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let filter = match directives {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.log_filter.as_deref())?;

    let engine = match &args.config {
        Some(path) => Engine::load(path)?,
        None => Engine::from_config(EngineConfig::default())?,
    };

    tracing::info!(config = ?args.config, "creature battle engine server starting");
    let service = EngineService::new(engine);
    let transport = (stdin(), stdout());

    let server = service.serve(transport).await?;
    let quit_reason = server.waiting().await?;

    tracing::info!(?quit_reason, "creature battle engine server exiting");
    Ok(())
}
