use std::env;
use std::ffi::{OsStr, OsString};
use std::sync::{Mutex, MutexGuard};

use crate::model::{KanjiItem, VocabItem, WordClass};
use crate::repository::ItemSnapshot;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn apply(key: &str, value: Option<&OsStr>) {
    #[allow(unused_unsafe)]
    unsafe {
        match value {
            Some(value) => env::set_var(key, value),
            None => env::remove_var(key),
        }
    }
}

/// Puts the previous values back when dropped, also while unwinding.
struct EnvRestore<'a> {
    saved: Vec<(&'a str, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl Drop for EnvRestore<'_> {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..).rev() {
            apply(key, value.as_deref());
        }
    }
}

/// Runs `f` with `overrides` applied; `None` unsets a variable.
///
/// Tests touching the environment are serialised on one lock.
pub(crate) fn with_env_vars<T>(overrides: &[(&str, Option<&str>)], f: impl FnOnce() -> T) -> T {
    let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _restore = EnvRestore {
        saved: overrides
            .iter()
            .map(|(key, _)| (*key, env::var_os(key)))
            .collect(),
        _lock: lock,
    };
    for (key, value) in overrides {
        apply(key, value.map(OsStr::new));
    }
    f()
}

pub(crate) fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Small snapshot used across unit tests.
///
/// Kanji: 走 (apprentice), 食 (guru), 水 (master).
/// Vocabulary: 走る godan (guru), 食べる ichidan (master), 日本 noun (burned).
pub(crate) fn sample_snapshot() -> ItemSnapshot {
    ItemSnapshot::new(
        vec![
            KanjiItem::new("走", "apprentice", 2),
            KanjiItem::new("食", "guru", 5),
            KanjiItem::new("水", "master", 7),
        ],
        vec![
            VocabItem::with_word_class(
                "走る",
                strings(&["はしる"]),
                WordClass::VerbGodan('る'),
                "guru",
                5,
            ),
            VocabItem::new(
                "食べる",
                strings(&["たべる"]),
                strings(&["to eat"]),
                "master",
                7,
            ),
            VocabItem::new("日本", strings(&["にほん"]), strings(&["Japan"]), "burned", 9),
        ],
    )
}
