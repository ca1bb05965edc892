mod codec;
mod files;
mod hash;
mod navigate;
mod os;

pub use hash::digest_file;
pub use navigate::{list_dir, Entry, EntryKind};
pub use os::{format_speed, OsQuery, LINE_ENDING};

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::session::Session;
use crate::path::PathPolicy;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    UnknownVerb(String),
    #[error("{verb} expects {expected} argument(s), got {found}")]
    Arity {
        verb: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("unknown os option: {0}")]
    UnknownOsQuery(String),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{op} '{}': {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("not a directory: '{}'", .0.display())]
    NotADirectory(PathBuf),
    #[error("source and destination are the same file: '{}'", .0.display())]
    SameFile(PathBuf),
    #[error("invalid file name: '{0}'")]
    InvalidName(String),
    #[error("cannot read working directory: {0}")]
    WorkingDir(#[source] io::Error),
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub(crate) fn io_error(op: &'static str, path: &Path) -> impl FnOnce(io::Error) -> CommandError {
    let path = path.to_path_buf();
    move |source| CommandError::Io { op, path, source }
}

pub(crate) async fn say<W>(out: &mut W, message: &str) -> Result<(), CommandError>
where
    W: AsyncWrite + Unpin + Send,
{
    out.write_all(format!("{message}\n").as_bytes())
        .await
        .map_err(CommandError::Output)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Exit,
    Up,
    Cd,
    Ls,
    Cat,
    Add,
    Rn,
    Cp,
    Mv,
    Rm,
    Os,
    Hash,
    Compress,
    Decompress,
}

impl Verb {
    pub const ALL: [Verb; 14] = [
        Verb::Exit,
        Verb::Up,
        Verb::Cd,
        Verb::Ls,
        Verb::Cat,
        Verb::Add,
        Verb::Rn,
        Verb::Cp,
        Verb::Mv,
        Verb::Rm,
        Verb::Os,
        Verb::Hash,
        Verb::Compress,
        Verb::Decompress,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Verb::Exit => ".exit",
            Verb::Up => "up",
            Verb::Cd => "cd",
            Verb::Ls => "ls",
            Verb::Cat => "cat",
            Verb::Add => "add",
            Verb::Rn => "rn",
            Verb::Cp => "cp",
            Verb::Mv => "mv",
            Verb::Rm => "rm",
            Verb::Os => "os",
            Verb::Hash => "hash",
            Verb::Compress => "compress",
            Verb::Decompress => "decompress",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Verb::Exit | Verb::Up | Verb::Ls => 0,
            Verb::Cd | Verb::Cat | Verb::Add | Verb::Rm | Verb::Os | Verb::Hash => 1,
            Verb::Rn | Verb::Cp | Verb::Mv | Verb::Compress | Verb::Decompress => 2,
        }
    }

    // rn and rm resolve against the process working directory
    pub fn path_policy(self) -> PathPolicy {
        match self {
            Verb::Rn | Verb::Rm => PathPolicy::ProcessDir,
            _ => PathPolicy::Session,
        }
    }

    pub fn from_name(name: &str) -> Option<Verb> {
        Verb::ALL.into_iter().find(|verb| verb.name() == name)
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        Verb::ALL.into_iter().map(Verb::name)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathArg(String);

impl PathArg {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PathArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    Up,
    Cd(PathArg),
    Ls,
    Cat(PathArg),
    Add(PathArg),
    Rename { file: PathArg, new_name: PathArg },
    Copy { file: PathArg, dest_dir: PathArg },
    Move { file: PathArg, dest_dir: PathArg },
    Remove(PathArg),
    Os(OsQuery),
    Hash(PathArg),
    Compress { file: PathArg, dest_dir: PathArg },
    Decompress { file: PathArg, dest_dir: PathArg },
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next().ok_or(ParseError::Empty)?;
        let args: Vec<&str> = tokens.collect();

        let verb = Verb::from_name(name).ok_or_else(|| ParseError::UnknownVerb(name.to_string()))?;
        if args.len() != verb.arity() {
            return Err(ParseError::Arity {
                verb: verb.name(),
                expected: verb.arity(),
                found: args.len(),
            });
        }

        let arg = |i: usize| PathArg::new(args[i]);
        let command = match verb {
            Verb::Exit => Command::Exit,
            Verb::Up => Command::Up,
            Verb::Cd => Command::Cd(arg(0)),
            Verb::Ls => Command::Ls,
            Verb::Cat => Command::Cat(arg(0)),
            Verb::Add => Command::Add(arg(0)),
            Verb::Rn => Command::Rename {
                file: arg(0),
                new_name: arg(1),
            },
            Verb::Cp => Command::Copy {
                file: arg(0),
                dest_dir: arg(1),
            },
            Verb::Mv => Command::Move {
                file: arg(0),
                dest_dir: arg(1),
            },
            Verb::Rm => Command::Remove(arg(0)),
            Verb::Os => Command::Os(
                OsQuery::from_flag(args[0])
                    .ok_or_else(|| ParseError::UnknownOsQuery(args[0].to_string()))?,
            ),
            Verb::Hash => Command::Hash(arg(0)),
            Verb::Compress => Command::Compress {
                file: arg(0),
                dest_dir: arg(1),
            },
            Verb::Decompress => Command::Decompress {
                file: arg(0),
                dest_dir: arg(1),
            },
        };
        Ok(command)
    }

    pub fn verb(&self) -> Verb {
        match self {
            Command::Exit => Verb::Exit,
            Command::Up => Verb::Up,
            Command::Cd(_) => Verb::Cd,
            Command::Ls => Verb::Ls,
            Command::Cat(_) => Verb::Cat,
            Command::Add(_) => Verb::Add,
            Command::Rename { .. } => Verb::Rn,
            Command::Copy { .. } => Verb::Cp,
            Command::Move { .. } => Verb::Mv,
            Command::Remove(_) => Verb::Rm,
            Command::Os(_) => Verb::Os,
            Command::Hash(_) => Verb::Hash,
            Command::Compress { .. } => Verb::Compress,
            Command::Decompress { .. } => Verb::Decompress,
        }
    }

    pub async fn execute<W>(&self, session: &mut Session, out: &mut W) -> Result<(), CommandError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let policy = self.verb().path_policy();
        let resolve = |session: &Session, arg: &PathArg| {
            session
                .resolve(arg.as_str(), policy)
                .map_err(CommandError::WorkingDir)
        };

        match self {
            Command::Exit => Ok(()),
            Command::Up => {
                navigate::up(session);
                Ok(())
            }
            Command::Cd(dir) => {
                let target = resolve(session, dir)?;
                navigate::cd(session, target).await
            }
            Command::Ls => navigate::ls(session, out).await,
            Command::Cat(file) => files::cat(&resolve(session, file)?, out).await,
            Command::Add(file) => files::add(&resolve(session, file)?, out).await,
            Command::Rename { file, new_name } => {
                files::rename(&resolve(session, file)?, new_name.as_str(), out).await
            }
            Command::Copy { file, dest_dir } => {
                let source = resolve(session, file)?;
                let dest_dir = resolve(session, dest_dir)?;
                files::copy(&source, &dest_dir).await
            }
            Command::Move { file, dest_dir } => {
                let source = resolve(session, file)?;
                let dest_dir = resolve(session, dest_dir)?;
                files::move_file(&source, &dest_dir, out).await
            }
            Command::Remove(file) => files::remove(&resolve(session, file)?, out).await,
            Command::Os(query) => os::query(*query, session, out).await,
            Command::Hash(file) => hash::hash(&resolve(session, file)?, out).await,
            Command::Compress { file, dest_dir } => {
                let source = resolve(session, file)?;
                let dest_dir = resolve(session, dest_dir)?;
                codec::compress(&source, &dest_dir, out).await
            }
            Command::Decompress { file, dest_dir } => {
                let source = resolve(session, file)?;
                let dest_dir = resolve(session, dest_dir)?;
                codec::decompress(&source, &dest_dir, out).await
            }
        }
    }
}
