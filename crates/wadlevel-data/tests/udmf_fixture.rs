use wadlevel_data::{LevelData, decode_level, parse_udmf};
use wadlevel_types::{LevelFormat, LevelNamespace, LineFlags, NO_TEXTURE, ThingFlags};

const SQUARE_ROOM: &str = include_str!("fixtures/square_room.textmap");

#[test]
fn square_room_parses() {
    let map = parse_udmf(SQUARE_ROOM).unwrap_or_else(|e| panic!("square_room.textmap: {e}"));

    assert_eq!(map.namespace.as_deref(), Some("zdoom"));
    assert_eq!(map.vertices.len(), 4);
    assert_eq!(map.lines.len(), 4);
    assert_eq!(map.sides.len(), 4);
    assert_eq!(map.sectors.len(), 1);
    assert_eq!(map.things.len(), 2);

    assert_eq!((map.vertices[2].x, map.vertices[2].y), (128.0, -128.0));

    let switch = &map.lines[1];
    assert_eq!(switch.special, 80);
    assert_eq!(switch.arg0str.as_deref(), Some("OpenDoor"));
    assert_eq!(switch.args, [0, 2, 0, 0, 0]);
    assert_eq!(switch.ids, vec![4, 5, 6]);
    assert_eq!(
        switch.flags,
        LineFlags::BLOCK | LineFlags::PLAYER_USE | LineFlags::REPEATS
    );

    for line in [&map.lines[0], &map.lines[2]] {
        assert_eq!(line.ids, vec![-1], "zdoom lines default to no id");
    }
    assert_eq!(map.lines[3].side_back, None);
    assert!(map.lines[3].flags.contains(LineFlags::HIDDEN));

    let side = &map.sides[1];
    assert_eq!(side.texture_mid, "SW1STRTN");
    assert_eq!(side.texture_upper, NO_TEXTURE);
    assert_eq!(side.texture_x, 16);
    assert_eq!(map.sides[3].texture_y, -8);

    let sector = &map.sectors[0];
    assert_eq!(sector.height(), 128);
    assert_eq!(sector.light, 192);
    assert_eq!(sector.texture_floor, "FLOOR4_8");

    let player = &map.things[0];
    assert_eq!(player.kind, 1);
    assert_eq!(player.angle, 90);
    assert_eq!(
        player.flags,
        ThingFlags::SKILL_1
            | ThingFlags::SKILL_2
            | ThingFlags::SKILL_3
            | ThingFlags::SKILL_4
            | ThingFlags::SKILL_5
            | ThingFlags::SINGLE
    );

    let item = &map.things[1];
    assert_eq!((item.x, item.y, item.z), (64.5, -32.0, 16.0));
    assert_eq!(item.id, 3);
    assert_eq!(
        item.flags,
        ThingFlags::DM | ThingFlags::COOP | ThingFlags::FRIEND
    );
}

#[test]
fn square_room_decodes_as_a_level() {
    let level_data = LevelData::new("MAP01").with_lump("TEXTMAP", SQUARE_ROOM.as_bytes());
    assert_eq!(level_data.format, LevelFormat::Udmf);

    let level = decode_level(level_data).unwrap_or_else(|e| panic!("MAP01: {e}"));
    assert_eq!(level.name, "MAP01");
    assert_eq!(level.namespace, LevelNamespace::ZDoom);
    assert_eq!(level.bounds(), Some((-128.0, -128.0, 128.0, 128.0)));
    for line in &level.lines {
        assert!(level.line_vertices(line).is_some());
        let (front, back) = level.line_sides(line);
        assert!(front.is_some());
        assert!(back.is_none());
    }
}

#[test]
fn vanilla_namespace_keeps_zero_ids() {
    let text = SQUARE_ROOM.replace("namespace = \"zdoom\";", "namespace = \"doom\";");
    let map = parse_udmf(&text).unwrap_or_else(|e| panic!("doom variant: {e}"));
    assert_eq!(map.lines[0].ids, vec![0]);
    assert_eq!(map.lines[1].ids, vec![4, 5, 6]);
}
