//! Script builders
//!
//! Builds the AppleScript text for status queries and commands. Everything
//! here is pure string assembly; the adapter decides when to run it.

use crate::adapter::ExecCtx;
use crate::command::{clamp_rating, clamp_volume, Command, RepeatArg, RepeatMode};
use crate::kind::PlayerKind;
use crate::profile::PlayerProfile;

/// Escape a user-supplied string for embedding in a quoted script literal
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// One `tell application "..." to <verb>` line
fn tell(profile: &PlayerProfile, verb: &str) -> String {
    format!("tell application \"{}\" to {}", profile.app_name, verb)
}

/// The status query script for one player
///
/// Each script checks whether the application process exists before talking
/// to it (a `tell` would otherwise launch the app), then returns a single
/// record reply. The "not running" branch returns a minimal stopped record
/// so the caller never has to special-case an empty reply.
pub fn status_script(kind: PlayerKind) -> String {
    let profile = PlayerProfile::of(kind);
    let body = match kind {
        PlayerKind::Spotify => {
            r#"        try
            set playerState to player state as string
            set trackName to name of current track
            set trackArtist to artist of current track
            set trackAlbum to album of current track
            set albumArtist to album artist of current track
            set trackDuration to duration of current track
            set playerPos to player position
            set soundVol to sound volume
            set isShuffling to shuffling
            set isRepeating to repeating
            return {playerState:playerState, trackName:trackName, trackArtist:trackArtist, trackAlbum:trackAlbum, albumArtist:albumArtist, trackDuration:trackDuration, playerPosition:playerPos, soundVolume:soundVol, shuffling:isShuffling, repeating:isRepeating}
        on error errMsg
            return {error:errMsg}
        end try"#
        }
        PlayerKind::AppleMusic => {
            r#"        try
            set playerState to player state as string
            set soundVol to sound volume
            set isShuffleEnabled to shuffle enabled
            set repeatMode to song repeat as string
            if playerState is not equal to "stopped" then
                set trackName to name of current track
                set trackArtist to artist of current track
                set trackAlbum to album of current track
                set albumArtist to album artist of current track
                set trackDuration to duration of current track
                set playerPos to player position
                set trackRating to rating of current track
                return {playerState:playerState, trackName:trackName, trackArtist:trackArtist, trackAlbum:trackAlbum, albumArtist:albumArtist, trackDuration:trackDuration, playerPosition:playerPos, rating:trackRating, soundVolume:soundVol, shuffleEnabled:isShuffleEnabled, songRepeat:repeatMode}
            else
                return {playerState:"stopped", trackName:"", trackArtist:"", trackAlbum:"", albumArtist:"", trackDuration:0, playerPosition:0, rating:0, soundVolume:soundVol, shuffleEnabled:isShuffleEnabled, songRepeat:repeatMode}
            end if
        on error errMsg
            return {error:errMsg}
        end try"#
        }
        PlayerKind::Vlc => {
            r#"        try
            set isPlaying to playing
            set currentPos to current time
            set totalDuration to duration of current item
            set mediaName to name of current item
            set volLevel to audio volume
            set isMuted to muted
            set isFullscreen to fullscreen mode
            set isLooping to looping
            set isRandom to random order
            return {playing:isPlaying, currentTime:currentPos, duration:totalDuration, mediaName:mediaName, audioVolume:volLevel, muted:isMuted, fullscreen:isFullscreen, looping:isLooping, randomMode:isRandom}
        on error
            return {playing:false, currentTime:0, duration:0, mediaName:"", audioVolume:128, muted:false, fullscreen:false, looping:false, randomMode:false}
        end try"#
        }
    };

    format!(
        r#"tell application "System Events"
    set appRunning to (name of processes) contains "{process}"
end tell

if appRunning then
    tell application "{app}"
{body}
    end tell
else
    return {{notRunning:true}}
end if"#,
        process = profile.process_name,
        app = profile.app_name,
        body = body,
    )
}

/// Build the scripts for one command against one player
///
/// Returns an empty list for commands the player does not support - the
/// adapter treats that as a no-op. Relative and toggle commands resolve
/// against `ctx`, the last observed transport state.
pub fn command_scripts(kind: PlayerKind, command: &Command, ctx: &ExecCtx) -> Vec<String> {
    let profile = PlayerProfile::of(kind);
    match command {
        Command::Play => vec![tell(profile, "play")],
        Command::Pause => vec![tell(profile, "pause")],
        Command::PlayPause => vec![tell(
            profile,
            // Spelled differently in every dialect
            match kind {
                PlayerKind::Spotify => "playpause",
                PlayerKind::AppleMusic => "playpause",
                PlayerKind::Vlc => "play pause",
            },
        )],
        Command::Stop => match kind {
            // Spotify has no stop verb; pause and rewind to the start
            PlayerKind::Spotify => vec![
                tell(profile, "pause"),
                tell(profile, "set player position to 0"),
            ],
            PlayerKind::AppleMusic => vec![tell(profile, "stop")],
            PlayerKind::Vlc => vec![tell(profile, "stop")],
        },
        Command::Next => vec![tell(
            profile,
            match kind {
                PlayerKind::Vlc => "next",
                _ => "next track",
            },
        )],
        Command::Previous => vec![tell(
            profile,
            match kind {
                PlayerKind::Vlc => "previous",
                _ => "previous track",
            },
        )],
        Command::SetVolume(volume) => vec![set_volume(profile, clamp_volume(*volume))],
        Command::VolumeUp(amount) => {
            let target = ctx.volume.saturating_add((*amount).max(0));
            vec![set_volume(profile, clamp_volume(target))]
        }
        Command::VolumeDown(amount) => {
            let target = ctx.volume.saturating_sub((*amount).max(0));
            vec![set_volume(profile, clamp_volume(target))]
        }
        Command::Mute => vec![set_volume(profile, 0)],
        // Unmute target volume is resolved by the adapter (pre-mute memory)
        Command::Unmute => vec![],
        Command::Seek(position) => vec![seek(profile, kind, (*position).max(0))],
        Command::SkipForward(seconds) => {
            vec![seek(profile, kind, ctx.position.saturating_add((*seconds).max(0)))]
        }
        Command::SkipBackward(seconds) => {
            vec![seek(profile, kind, ctx.position.saturating_sub((*seconds).max(0)).max(0))]
        }
        Command::SetShuffle(arg) => {
            let on = arg.resolve(ctx.shuffling);
            vec![tell(
                profile,
                &match kind {
                    PlayerKind::Spotify => format!("set shuffling to {}", on),
                    PlayerKind::AppleMusic => format!("set shuffle enabled to {}", on),
                    PlayerKind::Vlc => format!("set random order to {}", on),
                },
            )]
        }
        Command::SetRepeat(arg) => set_repeat(profile, kind, arg, ctx),
        Command::SetRating(rating) => {
            if !profile.rating {
                return vec![];
            }
            // API rating is 0-5 stars; the player stores 0-100
            vec![tell(
                profile,
                &format!("set rating of current track to {}", clamp_rating(*rating) * 20),
            )]
        }
        Command::PlayUri(uri) => {
            if kind != PlayerKind::Spotify {
                return vec![];
            }
            vec![tell(
                profile,
                &format!("play track \"{}\"", escape(&to_spotify_uri(uri))),
            )]
        }
        Command::SearchAndPlay(query) => search_and_play(profile, kind, query),
        Command::PlayPlaylist(name) => {
            if kind != PlayerKind::AppleMusic {
                return vec![];
            }
            vec![format!(
                r#"tell application "{}"
    try
        play playlist "{}"
    end try
end tell"#,
                profile.app_name,
                escape(name)
            )]
        }
        Command::PlayAlbum { album, artist } => {
            if kind != PlayerKind::AppleMusic {
                return vec![];
            }
            let filter = match artist {
                Some(artist) => format!(
                    "album is \"{}\" and artist is \"{}\"",
                    escape(album),
                    escape(artist)
                ),
                None => format!("album is \"{}\"", escape(album)),
            };
            vec![format!(
                r#"tell application "{}"
    try
        play (first track of library playlist 1 whose {})
    end try
end tell"#,
                profile.app_name, filter
            )]
        }
        Command::OpenMedia(path) => {
            if kind != PlayerKind::Vlc {
                return vec![];
            }
            vec![tell(profile, &format!("open POSIX file \"{}\"", escape(path)))]
        }
        Command::OpenUrl(url) => {
            if kind != PlayerKind::Vlc {
                return vec![];
            }
            vec![tell(profile, &format!("open location \"{}\"", escape(url)))]
        }
        Command::SetPlaybackRate(rate) => {
            if kind != PlayerKind::Vlc {
                return vec![];
            }
            vec![tell(profile, &format!("set playback rate to {}", rate.factor()))]
        }
        Command::SetFullscreen(arg) => {
            if kind != PlayerKind::Vlc {
                return vec![];
            }
            vec![tell(
                profile,
                &format!("set fullscreen mode to {}", arg.resolve(ctx.fullscreen)),
            )]
        }
    }
}

/// Volume set script in the player's native scale
pub fn set_volume(profile: &PlayerProfile, volume: i64) -> String {
    let native = profile.to_native_volume(volume);
    match profile.kind {
        PlayerKind::Vlc => tell(profile, &format!("set audio volume to {}", native)),
        _ => tell(profile, &format!("set sound volume to {}", native)),
    }
}

fn seek(profile: &PlayerProfile, kind: PlayerKind, position: i64) -> String {
    match kind {
        PlayerKind::Vlc => tell(profile, &format!("set current time to {}", position)),
        _ => tell(profile, &format!("set player position to {}", position)),
    }
}

fn set_repeat(
    profile: &PlayerProfile,
    kind: PlayerKind,
    arg: &RepeatArg,
    ctx: &ExecCtx,
) -> Vec<String> {
    let mode = match arg {
        RepeatArg::Mode(mode) => *mode,
        RepeatArg::Toggle => match ctx.repeat {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All if profile.repeat_one => RepeatMode::One,
            RepeatMode::All => RepeatMode::Off,
            RepeatMode::One => RepeatMode::Off,
        },
    };
    match kind {
        PlayerKind::AppleMusic => {
            vec![tell(profile, &format!("set song repeat to {}", mode.as_str()))]
        }
        // Boolean repeat; `one` is not expressible, drop it as a no-op
        PlayerKind::Spotify => match mode {
            RepeatMode::One => vec![],
            _ => vec![tell(profile, &format!("set repeating to {}", mode.is_on()))],
        },
        PlayerKind::Vlc => match mode {
            RepeatMode::One => vec![],
            _ => vec![tell(profile, &format!("set looping to {}", mode.is_on()))],
        },
    }
}

fn search_and_play(profile: &PlayerProfile, kind: PlayerKind, query: &str) -> Vec<String> {
    match kind {
        PlayerKind::Spotify => {
            let uri = format!("spotify:search:{}", query.replace(' ', "+"));
            vec![tell(profile, &format!("play track \"{}\"", escape(&uri)))]
        }
        PlayerKind::AppleMusic => vec![format!(
            r#"tell application "{}"
    try
        set searchResults to (search library playlist 1 for "{}")
        if (count of searchResults) > 0 then
            play item 1 of searchResults
        end if
    end try
end tell"#,
            profile.app_name,
            escape(query)
        )],
        PlayerKind::Vlc => vec![],
    }
}

/// Convert an open.spotify.com URL to a `spotify:` URI; URIs pass through
pub fn to_spotify_uri(uri_or_url: &str) -> String {
    if uri_or_url.starts_with("spotify:") {
        return uri_or_url.to_string();
    }
    if let Some(idx) = uri_or_url.find("open.spotify.com/") {
        let path = &uri_or_url[idx + "open.spotify.com/".len()..];
        let mut segments = path.split(['/', '?']);
        if let (Some(content_type), Some(id)) = (segments.next(), segments.next()) {
            if matches!(content_type, "track" | "album" | "artist" | "playlist") && !id.is_empty() {
                return format!("spotify:{}:{}", content_type, id);
            }
        }
    }
    uri_or_url.to_string()
}
