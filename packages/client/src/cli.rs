//! Command-line interface for the client.

use std::sync::LazyLock;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use serde::Serialize;

use crate::client::Client;
use crate::comments::CommentsRequest;
use crate::config::{
    ClientConfig, DEFAULT_BASE_URL, ENV_API_KEY, ENV_BASE_URL, ENV_TIMEOUT_SECS, ENV_USER_ID,
    HTTP_TIMEOUT_SECS,
};
use crate::error::{ClientError, Result};
use crate::models::{Comment, Post, Tag, XmlPost};
use crate::posts::PostsRequest;
use crate::tags::TagsRequest;

/// Pattern for `--where` conditions such as `score>=10` or `id!=5`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CONDITION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z_]+)(!=|>=|<=|=|>|<)(-?\d+)$").expect("valid regex")
});

/// rule34 - Search posts, comments and tags through the dapi endpoint.
#[derive(Parser)]
#[command(name = "rule34")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Account user id
    #[arg(long, env = ENV_USER_ID, global = true, hide_env_values = true)]
    pub user_id: Option<String>,

    /// Account API key
    #[arg(long, env = ENV_API_KEY, global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Endpoint base URL
    #[arg(long, env = ENV_BASE_URL, global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = ENV_TIMEOUT_SECS, global = true, default_value_t = HTTP_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Print records as JSON instead of a summary
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search posts.
    Posts(PostsArgs),

    /// List comments.
    Comments(CommentsArgs),

    /// List tags.
    Tags(TagsArgs),
}

#[derive(Args, Debug, Default)]
pub struct PostsArgs {
    /// Tags every post must carry
    pub tags: Vec<String>,

    /// Tags no post may carry (repeatable)
    #[arg(short = 'x', long)]
    pub exclude: Vec<String>,

    /// Leave out AI-generated posts
    #[arg(long)]
    pub no_ai: bool,

    /// Content rating (safe, questionable, explicit)
    #[arg(short, long)]
    pub rating: Option<String>,

    /// Only children of this post
    #[arg(long, allow_negative_numbers = true)]
    pub parent: Option<i64>,

    /// Condition such as `score>=10` (repeatable)
    #[arg(long = "where", value_parser = parse_condition)]
    pub conditions: Vec<RawCondition>,

    /// Sort field (id, score, rating, user, height, width, parent, source, updated)
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort order (asc, desc)
    #[arg(long)]
    pub order: Option<String>,

    /// Maximum number of posts
    #[arg(short, long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Page number
    #[arg(short, long, allow_negative_numbers = true)]
    pub page: Option<i64>,

    /// Fetch a single post by id
    #[arg(long, allow_negative_numbers = true)]
    pub id: Option<i64>,

    /// Use the XML endpoint variant
    #[arg(long)]
    pub xml: bool,
}

#[derive(Args, Debug, Default)]
pub struct CommentsArgs {
    /// Only comments on this post
    #[arg(long, allow_negative_numbers = true)]
    pub post_id: Option<i64>,
}

#[derive(Args, Debug, Default)]
pub struct TagsArgs {
    /// Exact tag name
    #[arg(long)]
    pub name: Option<String>,

    /// Name pattern, `%` matching anything
    #[arg(long)]
    pub pattern: Option<String>,

    /// Tag id
    #[arg(long, allow_negative_numbers = true)]
    pub id: Option<i64>,

    /// Maximum number of tags
    #[arg(short, long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Page number
    #[arg(short, long, allow_negative_numbers = true)]
    pub page: Option<i64>,
}

/// A `--where` condition split into its parts. Field and operator names are
/// checked by the request builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCondition {
    pub field: String,
    pub operator: String,
    pub argument: i64,
}

fn parse_condition(raw: &str) -> std::result::Result<RawCondition, String> {
    let caps = CONDITION_PATTERN
        .captures(raw.trim())
        .ok_or_else(|| format!("expected <field><op><number>, e.g. score>=10, got '{raw}'"))?;

    let argument = caps[3]
        .parse()
        .map_err(|e| format!("invalid number in '{raw}': {e}"))?;

    Ok(RawCondition {
        field: caps[1].to_string(),
        operator: caps[2].to_string(),
        argument,
    })
}

impl Cli {
    /// Assemble the client configuration from flags and environment.
    pub fn config(&self) -> Result<ClientConfig> {
        let user_id = self.user_id.clone().ok_or_else(|| {
            ClientError::Config(format!("missing user id: pass --user-id or set {ENV_USER_ID}"))
        })?;
        let api_key = self.api_key.clone().ok_or_else(|| {
            ClientError::Config(format!("missing API key: pass --api-key or set {ENV_API_KEY}"))
        })?;

        Ok(ClientConfig::builder(user_id, api_key)
            .base_url(self.base_url.as_str())
            .timeout_secs(self.timeout)
            .build())
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let client = Client::from_config(&cli.config()?)?;

    match &cli.command {
        Commands::Posts(args) => posts_command(&client, args, cli.json),
        Commands::Comments(args) => comments_command(&client, args, cli.json),
        Commands::Tags(args) => tags_command(&client, args, cli.json),
    }
}

/// Feed parsed arguments into a post search builder.
pub fn apply_posts_args(request: &mut PostsRequest<'_>, args: &PostsArgs) {
    request
        .tags(args.tags.iter().cloned())
        .exclude(args.exclude.iter().cloned());

    if args.no_ai {
        request.filter_ai();
    }
    if let Some(rating) = &args.rating {
        request.rating(rating.as_str());
    }
    if let Some(parent) = args.parent {
        request.parent_id(parent);
    }
    for condition in &args.conditions {
        request.filter(
            condition.field.as_str(),
            condition.operator.as_str(),
            condition.argument,
        );
    }
    if let Some(sort) = &args.sort {
        request.sort_by(sort.as_str());
    }
    if let Some(order) = &args.order {
        request.order(order.as_str());
    }
    if let Some(limit) = args.limit {
        request.limit(limit);
    }
    if let Some(page) = args.page {
        request.page(page);
    }
    if let Some(id) = args.id {
        request.post_id(id);
    }
}

/// Feed parsed arguments into a comment listing builder.
pub fn apply_comments_args(request: &mut CommentsRequest<'_>, args: &CommentsArgs) {
    if let Some(post_id) = args.post_id {
        request.post_id(post_id);
    }
}

/// Feed parsed arguments into a tag listing builder.
pub fn apply_tags_args(request: &mut TagsRequest<'_>, args: &TagsArgs) {
    if let Some(name) = &args.name {
        request.name(name.as_str());
    }
    if let Some(pattern) = &args.pattern {
        request.name_pattern(pattern.as_str());
    }
    if let Some(id) = args.id {
        request.id(id);
    }
    if let Some(limit) = args.limit {
        request.limit(limit);
    }
    if let Some(page) = args.page {
        request.page(page);
    }
}

fn posts_command(client: &Client, args: &PostsArgs, json: bool) -> Result<()> {
    let mut request = client.posts();
    apply_posts_args(&mut request, args);

    if !json {
        println!(
            "{} {}",
            style("Searching").bold(),
            style(request.tag_string().trim_end()).cyan()
        );
    }

    if args.xml {
        let posts = with_spinner("Fetching posts...", || request.find_xml())?;
        if json {
            return print_json(&posts);
        }
        print_xml_posts(&posts);
    } else {
        let posts = with_spinner("Fetching posts...", || request.find())?;
        if json {
            return print_json(&posts);
        }
        print_posts(&posts);
    }
    Ok(())
}

fn comments_command(client: &Client, args: &CommentsArgs, json: bool) -> Result<()> {
    let mut request = client.comments();
    apply_comments_args(&mut request, args);

    let comments = with_spinner("Fetching comments...", || request.find())?;
    if json {
        return print_json(&comments);
    }
    print_comments(&comments);
    Ok(())
}

fn tags_command(client: &Client, args: &TagsArgs, json: bool) -> Result<()> {
    let mut request = client.tags();
    apply_tags_args(&mut request, args);

    let tags = with_spinner("Fetching tags...", || request.find())?;
    if json {
        return print_json(&tags);
    }
    print_tags(&tags);
    Ok(())
}

/// Run `fetch` behind a progress spinner.
fn with_spinner<T>(message: &str, fetch: impl FnOnce() -> Result<T>) -> Result<T> {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = fetch();
    pb.finish_and_clear();
    result
}

fn print_json<T: Serialize>(records: &[T]) -> Result<()> {
    let out = serde_json::to_string_pretty(records).map_err(ClientError::Output)?;
    println!("{out}");
    Ok(())
}

fn print_posts(posts: &[Post]) {
    for post in posts {
        println!(
            "  {} {} score {} {}x{}",
            style(format!("#{}", post.id)).cyan(),
            post.rating,
            style(post.score).green(),
            post.width,
            post.height
        );
        println!("    {}", post.file_url);
    }
    print_count(posts.len(), "posts");
}

fn print_xml_posts(posts: &[XmlPost]) {
    for post in posts {
        let created = post
            .created_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        println!(
            "  {} {} score {} {}x{} {}",
            style(format!("#{}", post.id)).cyan(),
            post.rating,
            style(post.score).green(),
            post.width,
            post.height,
            created
        );
        println!("    {}", post.file_url);
    }
    print_count(posts.len(), "posts");
}

fn print_comments(comments: &[Comment]) {
    for comment in comments {
        println!(
            "  {} on {} by {}",
            style(format!("#{}", comment.id)).cyan(),
            style(format!("#{}", comment.post_id)).cyan(),
            style(&comment.creator).green()
        );
        println!("    {}", comment.body);
    }
    print_count(comments.len(), "comments");
}

fn print_tags(tags: &[Tag]) {
    for tag in tags {
        println!("  {} ({})", style(&tag.name).cyan(), tag.count);
    }
    print_count(tags.len(), "tags");
}

fn print_count(count: usize, noun: &str) {
    println!();
    if count == 0 {
        println!("{}", style(format!("No {noun} found")).yellow());
    } else {
        println!("{} {noun}", style(count).bold());
    }
}
