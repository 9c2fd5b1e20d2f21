use bevy::prelude::*;
use bevy::audio::Volume;

#[derive(Resource)]
pub struct GameAudio {
    pub engine: Handle<AudioSource>,
    pub horn: Handle<AudioSource>,
    pub coin: Handle<AudioSource>,
    pub refuel: Handle<AudioSource>,
}

#[derive(Event)]
pub struct AudioEvent {
    pub sound: AudioType,
    pub volume: f32,
}

#[derive(Clone)]
pub enum AudioType {
    Horn,
    Coin,
    Refuel,
}

impl Default for AudioEvent {
    fn default() -> Self {
        Self {
            sound: AudioType::Coin,
            volume: 0.5,
        }
    }
}

pub fn setup_audio(mut commands: Commands, asset_server: Res<AssetServer>) {
    let audio = GameAudio {
        engine: asset_server.load("audio/engine.ogg"),
        horn: asset_server.load("audio/horn.ogg"),
        coin: asset_server.load("audio/coin.ogg"),
        refuel: asset_server.load("audio/refuel.ogg"),
    };

    commands.insert_resource(audio);
}

pub fn audio_system(
    mut commands: Commands,
    mut audio_events: EventReader<AudioEvent>,
    audio: Res<GameAudio>,
) {
    for event in audio_events.read() {
        let source = match event.sound {
            AudioType::Horn => &audio.horn,
            AudioType::Coin => &audio.coin,
            AudioType::Refuel => &audio.refuel,
        };

        commands.spawn((
            AudioPlayer(source.clone()),
            PlaybackSettings::DESPAWN.with_volume(Volume::Linear(event.volume)),
        ));
    }
}

// Helper function for easy audio triggering
pub fn play_sound(audio_events: &mut EventWriter<AudioEvent>, sound: AudioType, volume: f32) {
    audio_events.write(AudioEvent { sound, volume });
}
