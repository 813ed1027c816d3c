use bevy::prelude::*;
use overworld_core::MovementPolicy;

use crate::state::{HoveredLevel, MapNotice, MapState};
use crate::{AppState, MapSet};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Menu), spawn_menu)
            .add_systems(OnExit(AppState::Menu), despawn_menu)
            .add_systems(Update, handle_menu_buttons.run_if(in_state(AppState::Menu)))
            .add_systems(OnEnter(AppState::Playing), spawn_hud)
            .add_systems(OnExit(AppState::Playing), despawn_hud)
            .add_systems(
                Update,
                (show_notices, expire_toasts, update_tooltip, back_to_menu).in_set(MapSet::Present),
            );
    }
}

// -----------------------------------------------------------------------
// Menu UI
// -----------------------------------------------------------------------

#[derive(Component)]
struct MenuRoot;

#[derive(Component, Clone, Copy)]
enum MenuButton {
    Start,
    Quit,
}

fn spawn_menu(mut commands: Commands, state: Res<MapState>) {
    let bg = Color::srgb(0.1, 0.1, 0.12);
    let btn_bg = Color::srgb(0.22, 0.22, 0.28);

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(15.0),
                ..default()
            },
            BackgroundColor(bg),
            MenuRoot,
        ))
        .with_children(|root| {
            root.spawn((
                Text::new(&state.title),
                TextFont {
                    font_size: 40.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));

            if !state.description.is_empty() {
                root.spawn((
                    Text::new(&state.description),
                    TextFont {
                        font_size: 16.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.6, 0.6, 0.6)),
                ));
            }

            for (label, button) in [("Start Game", MenuButton::Start), ("Quit", MenuButton::Quit)] {
                root.spawn((
                    Button,
                    Node {
                        width: Val::Px(200.0),
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                    BackgroundColor(btn_bg),
                    button,
                ))
                .with_children(|btn| {
                    btn.spawn((
                        Text::new(label),
                        TextFont {
                            font_size: 20.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                });
            }
        });
}

fn despawn_menu(mut commands: Commands, menu: Query<Entity, With<MenuRoot>>) {
    for entity in &menu {
        commands.entity(entity).despawn_recursive();
    }
}

fn handle_menu_buttons(
    interactions: Query<(&Interaction, &MenuButton), Changed<Interaction>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, button) in &interactions {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match button {
            MenuButton::Start => next_state.set(AppState::Playing),
            MenuButton::Quit => {
                exit.send(AppExit::Success);
            }
        }
    }
}

// -----------------------------------------------------------------------
// HUD
// -----------------------------------------------------------------------

#[derive(Component)]
struct HudRoot;

#[derive(Component)]
struct ToastStack;

#[derive(Component)]
struct Toast(Timer);

#[derive(Component)]
struct Tooltip;

#[derive(Component)]
struct TooltipText;

fn instructions(policy: MovementPolicy) -> &'static str {
    match policy {
        MovementPolicy::StrictAdjacency => {
            "Click a neighbouring open level to move there. Click your current level to enter it.\n\
             Right-drag to orbit, middle-drag to pan, scroll to zoom. Esc for the menu."
        }
        MovementPolicy::FreeRoam => {
            "Click any open level to move there. Click your current level to enter it.\n\
             Right-drag to orbit, middle-drag to pan, scroll to zoom. Esc for the menu."
        }
    }
}

fn spawn_hud(mut commands: Commands, state: Res<MapState>) {
    let panel_bg = Color::srgba(0.1, 0.1, 0.12, 0.85);

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                ..default()
            },
            PickingBehavior::IGNORE,
            HudRoot,
        ))
        .with_children(|root| {
            // Top bar
            root.spawn((
                Node {
                    width: Val::Percent(100.0),
                    padding: UiRect::axes(Val::Px(10.0), Val::Px(6.0)),
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(4.0),
                    position_type: PositionType::Absolute,
                    top: Val::Px(0.0),
                    left: Val::Px(0.0),
                    ..default()
                },
                BackgroundColor(panel_bg),
                PickingBehavior::IGNORE,
            ))
            .with_children(|bar| {
                bar.spawn((
                    Text::new(&state.title),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
                bar.spawn((
                    Text::new(instructions(state.map.policy())),
                    TextFont {
                        font_size: 13.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.7, 0.7, 0.7)),
                ));
                if !state.issues.is_empty() {
                    bar.spawn((
                        Text::new(format!(
                            "{} configuration issue(s) in this world; see the log",
                            state.issues.len()
                        )),
                        TextFont {
                            font_size: 12.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.9, 0.7, 0.3)),
                    ));
                }
            });

            // Toasts, newest at the bottom
            root.spawn((
                Node {
                    width: Val::Percent(100.0),
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(30.0),
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(6.0),
                    ..default()
                },
                PickingBehavior::IGNORE,
                ToastStack,
            ));

            // Hover tooltip
            root.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    padding: UiRect::all(Val::Px(6.0)),
                    ..default()
                },
                BackgroundColor(panel_bg),
                Visibility::Hidden,
                PickingBehavior::IGNORE,
                Tooltip,
            ))
            .with_children(|tip| {
                tip.spawn((
                    Text::new(""),
                    TextFont {
                        font_size: 13.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                    TooltipText,
                ));
            });
        });
}

fn despawn_hud(mut commands: Commands, hud: Query<Entity, With<HudRoot>>) {
    for entity in &hud {
        commands.entity(entity).despawn_recursive();
    }
}

fn show_notices(
    mut commands: Commands,
    mut notices: EventReader<MapNotice>,
    state: Res<MapState>,
    stack: Query<Entity, With<ToastStack>>,
) {
    let Ok(stack) = stack.get_single() else {
        notices.clear();
        return;
    };
    let seconds = state.map.tuning().notification_seconds;

    for MapNotice(text) in notices.read() {
        let toast = commands
            .spawn((
                Node {
                    padding: UiRect::axes(Val::Px(14.0), Val::Px(6.0)),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
                PickingBehavior::IGNORE,
                Toast(Timer::from_seconds(seconds, TimerMode::Once)),
            ))
            .with_children(|t| {
                t.spawn((
                    Text::new(text.as_str()),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            })
            .id();
        commands.entity(stack).add_child(toast);
    }
}

fn expire_toasts(
    mut commands: Commands,
    time: Res<Time>,
    mut toasts: Query<(Entity, &mut Toast)>,
) {
    for (entity, mut toast) in &mut toasts {
        if toast.0.tick(time.delta()).finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

fn update_tooltip(
    hovered: Res<HoveredLevel>,
    state: Res<MapState>,
    windows: Query<&Window>,
    mut tooltip: Query<(&mut Node, &mut Visibility), With<Tooltip>>,
    mut text: Query<&mut Text, With<TooltipText>>,
) {
    let Ok((mut node, mut vis)) = tooltip.get_single_mut() else {
        return;
    };

    let directive = hovered
        .id
        .as_ref()
        .and_then(|id| state.map.directives().node(id));
    let cursor = windows.get_single().ok().and_then(Window::cursor_position);

    let (Some(directive), Some(cursor)) = (directive, cursor) else {
        *vis = Visibility::Hidden;
        return;
    };

    node.left = Val::Px(cursor.x + 16.0);
    node.top = Val::Px(cursor.y + 16.0);
    *vis = Visibility::Inherited;
    if let Ok(mut text) = text.get_single_mut()
        && **text != directive.status_text
    {
        **text = directive.status_text.clone();
    }
}

fn back_to_menu(keys: Res<ButtonInput<KeyCode>>, mut next_state: ResMut<NextState<AppState>>) {
    if keys.just_pressed(KeyCode::Escape) {
        next_state.set(AppState::Menu);
    }
}
