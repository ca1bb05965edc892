use sysinfo::{CpuRefreshKind, RefreshKind, System};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::{say, CommandError};
use crate::core::session::Session;
use crate::core::table::Table;

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsQuery {
    Eol,
    Cpus,
    HomeDir,
    Username,
    Architecture,
}

impl OsQuery {
    pub const ALL: [OsQuery; 5] = [
        OsQuery::Eol,
        OsQuery::Cpus,
        OsQuery::HomeDir,
        OsQuery::Username,
        OsQuery::Architecture,
    ];

    pub fn flag(self) -> &'static str {
        match self {
            OsQuery::Eol => "--EOL",
            OsQuery::Cpus => "--cpus",
            OsQuery::HomeDir => "--homedir",
            OsQuery::Username => "--username",
            OsQuery::Architecture => "--architecture",
        }
    }

    pub fn from_flag(flag: &str) -> Option<OsQuery> {
        OsQuery::ALL.into_iter().find(|query| query.flag() == flag)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct CpuInfo {
    model: String,
    mhz: u64,
}

pub fn format_speed(mhz: u64) -> String {
    let ghz = (mhz as f64 / 100.0).round() / 10.0;
    format!("{ghz} GHz")
}

fn cpu_table(cpus: &[CpuInfo]) -> Table {
    let mut table = Table::new(["model", "speed"]);
    for cpu in cpus {
        table.push_row([cpu.model.clone(), format_speed(cpu.mhz)]);
    }
    table
}

fn read_cpus() -> Vec<CpuInfo> {
    let system = System::new_with_specifics(
        RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing().with_frequency()),
    );
    system
        .cpus()
        .iter()
        .map(|cpu| CpuInfo {
            model: cpu.brand().trim().to_string(),
            mhz: cpu.frequency(),
        })
        .collect()
}

pub(super) async fn query<W>(query: OsQuery, session: &Session, out: &mut W) -> Result<(), CommandError>
where
    W: AsyncWrite + Unpin + Send,
{
    match query {
        OsQuery::Eol => say(out, &format!("{LINE_ENDING:?}")).await,
        OsQuery::Cpus => {
            let cpus = tokio::task::spawn_blocking(read_cpus).await?;
            out.write_all(cpu_table(&cpus).render().as_bytes())
                .await
                .map_err(CommandError::Output)
        }
        OsQuery::HomeDir => say(out, &session.home_dir().display().to_string()).await,
        OsQuery::Username => say(out, &whoami::username()).await,
        OsQuery::Architecture => say(out, std::env::consts::ARCH).await,
    }
}
