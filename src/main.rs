//! # classbell CLI
//!
//! Semester class-schedule reminder. Meant to run from cron every few
//! minutes; each invocation does one sequential check-and-notify pass.
//!
//! Usage:
//!   classbell run         # check-and-notify pass (default)
//!   classbell test        # send a fixed test message, print state
//!   classbell debug       # print computed state, send nothing
//!
//! `FEISHU_WEBHOOK_URL` must be set for `run` and `test`.

use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use classbell_channels::FeishuChannel;
use classbell_core::traits::Notifier;
use classbell_core::{webhook_url_from_env, Timetable};
use classbell_schedule::clock::{beijing_now, date_of_week_day, format_date_cn};
use classbell_schedule::{format, matcher};

#[derive(Parser)]
#[command(
    name = "classbell",
    version,
    about = "🔔 classbell — semester class-schedule reminder over a Feishu webhook"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Timetable file path (default: ~/.classbell/timetable.toml if present)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one check-and-notify pass (the default)
    #[command(alias = "normal")]
    Run,
    /// Send a test notification and print the current schedule state
    Test,
    /// Print the full computed state without sending anything
    Debug,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "classbell=debug,classbell_core=debug,classbell_schedule=debug,classbell_channels=debug"
    } else {
        "classbell=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    let timetable = if let Some(path) = &cli.config {
        Timetable::load_from(Path::new(path))?
    } else {
        Timetable::load()?
    };

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_reminder_check(&timetable).await,
        Commands::Test => run_test_mode(&timetable).await,
        Commands::Debug => run_debug_mode(&timetable),
    }
}

/// The normal cron pass: pre-class reminders, then the nightly preview.
async fn run_reminder_check(timetable: &Timetable) -> Result<()> {
    let now = beijing_now();
    let week = classbell_schedule::weeks::current_week(now, timetable.semester_start);

    println!("{}", "=".repeat(50));
    println!("🚀 课程提醒系统启动");
    println!("⏰ 当前时间: {}", now.format("%Y-%m-%d %H:%M:%S"));
    println!("📅 当前学期周次: 第{week}周");
    println!("{}", "=".repeat(50));

    let webhook_url = webhook_url_from_env()?;
    let channel = FeishuChannel::new(webhook_url);
    let mut sent_anything = false;

    // 1. Pre-class reminders
    println!("🔍 检查课前提醒...");
    let upcoming = matcher::upcoming_classes(timetable, now)?;
    if upcoming.is_empty() {
        println!("✅ 当前时间无需发送课前提醒");
    } else {
        println!("📚 发现 {} 门即将开始的课程", upcoming.len());
        sent_anything = true;
        for (i, class) in upcoming.iter().enumerate() {
            let message = format::class_reminder(class);
            tracing::info!(course = %class.course.name, trigger = %class.reminder_time,
                "sending class reminder");
            if channel.send_text(&message).await {
                println!("✅ 课前提醒发送成功: {}", class.course.name);
            } else {
                println!("❌ 课前提醒发送失败: {}", class.course.name);
            }
            // Keep under the bot rate limit.
            if i + 1 < upcoming.len() {
                tokio::time::sleep(std::time::Duration::from_secs(2)).await;
            }
        }
    }

    // 2. Tomorrow preview
    println!("🔍 检查明日预告...");
    if matcher::should_send_preview(now) {
        println!("🌙 到了发送明日预告的时间");
        sent_anything = true;
        let tomorrow = matcher::tomorrow_classes(timetable, now)?;
        let message = format::tomorrow_preview(&tomorrow);
        if channel.send_text(&message).await {
            println!("✅ 明日预告发送成功");
        } else {
            println!("❌ 明日预告发送失败");
        }
    } else {
        println!("✅ 当前时间无需发送明日预告");
    }

    if !sent_anything {
        println!("😴 当前时间段无需发送任何提醒");
    }

    println!("{}", "=".repeat(50));
    println!("✅ 课程提醒系统检查完成");
    println!("{}", "=".repeat(50));
    Ok(())
}

/// Send the deployment-check message, then summarize computed state.
async fn run_test_mode(timetable: &Timetable) -> Result<()> {
    println!("🧪 运行测试模式");

    let webhook_url = webhook_url_from_env()?;
    let channel = FeishuChannel::new(webhook_url);
    let now = beijing_now();

    if channel.send_text(&format::test_message(now)).await {
        println!("✅ 测试通知发送成功");
    } else {
        anyhow::bail!("测试通知发送失败");
    }

    println!("\n📊 当前课程状态:");
    println!(
        "当前周次: 第{}周",
        classbell_schedule::weeks::current_week(now, timetable.semester_start)
    );

    let upcoming = matcher::upcoming_classes(timetable, now)?;
    println!("即将开始的课程: {}门", upcoming.len());

    let tomorrow = matcher::tomorrow_classes(timetable, now)?;
    println!("明天的课程: {}门", tomorrow.len());
    if !tomorrow.is_empty() {
        println!("明天的课程列表:");
        for class in &tomorrow {
            println!(
                "  - {} ({}校区, {}-{})",
                class.course.name, class.course.campus, class.time.start, class.time.end
            );
        }
    }
    Ok(())
}

/// Print everything the matcher would do right now; no webhook needed.
fn run_debug_mode(timetable: &Timetable) -> Result<()> {
    println!("🐛 运行调试模式");

    let now = beijing_now();
    let week = classbell_schedule::weeks::current_week(now, timetable.semester_start);
    println!("\n📊 系统状态:");
    println!("当前时间: {}", now.format("%Y-%m-%d %H:%M:%S"));
    println!("当前周次: 第{week}周");
    println!(
        "本周日期: {} - {}",
        format_date_cn(date_of_week_day(timetable.semester_start, week, 1)),
        format_date_cn(date_of_week_day(timetable.semester_start, week, 7))
    );

    let upcoming = matcher::upcoming_classes(timetable, now)?;
    println!("\n📚 即将开始的课程 ({}门):", upcoming.len());
    if upcoming.is_empty() {
        println!("  无");
    } else {
        for class in &upcoming {
            println!("\n课程: {}", class.course.name);
            println!("校区: {}", class.course.campus);
            println!("时间: {}-{}", class.time.start, class.time.end);
            println!("提醒消息:");
            println!("{}", format::class_reminder(class));
        }
    }

    let tomorrow = matcher::tomorrow_classes(timetable, now)?;
    println!("\n🌙 明天的课程 ({}门):", tomorrow.len());
    if tomorrow.is_empty() {
        println!("  无");
        println!("\n无课祝福消息:");
        println!("{}", format::tomorrow_preview(&[]));
    } else {
        for class in &tomorrow {
            println!(
                "  - {} ({}校区, {}-{})",
                class.course.name, class.course.campus, class.time.start, class.time.end
            );
        }
        println!("\n明日预告消息:");
        println!("{}", format::tomorrow_preview(&tomorrow));
    }

    println!(
        "\n⏰ 是否应该发送明日预告: {}",
        if matcher::should_send_preview(now) { "是" } else { "否" }
    );
    Ok(())
}
