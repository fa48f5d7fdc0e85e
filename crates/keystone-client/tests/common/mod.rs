//! Canned Keystone payloads shared by the integration tests

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Auth response with a seven-service catalog; the identity admin URL is configurable
pub fn auth_response(identity_admin_url: &str) -> Value {
    json!({
        "access": {
            "token": {
                "expires": "2012-06-02T14:17:00Z",
                "id": "secret",
                "tenant": {"id": "tenant-uuid", "name": "admin"}
            },
            "serviceCatalog": [
                {
                    "endpoints": [{
                        "adminURL": "http://nova.mycloud.com:8774/v2/xpto",
                        "region": "RegionOne",
                        "internalURL": "http://nova.mycloud.com:8774/v2/xpto",
                        "publicURL": "http://nova.mycloud.com:8774/v2/xpto"
                    }],
                    "endpoints_links": [],
                    "type": "compute",
                    "name": "Compute Service"
                },
                {
                    "endpoints": [{
                        "adminURL": "http://nova.mycloud.com:3333",
                        "region": "RegionOne",
                        "internalURL": "http://nova.mycloud.com:3333",
                        "publicURL": "http://nova.mycloud.com:3333"
                    }],
                    "type": "s3",
                    "name": "S3 Service"
                },
                {
                    "endpoints": [{
                        "adminURL": "http://glance.mycloud.com:9292/v1",
                        "region": "RegionOne",
                        "internalURL": "http://glance.mycloud.com:9292/v1",
                        "publicURL": "http://glance.mycloud.com:9292/v1"
                    }],
                    "type": "image",
                    "name": "Image Service"
                },
                {
                    "endpoints": [{
                        "adminURL": "http://nova.mycloud.com:8776/v1/xpto",
                        "region": "RegionOne",
                        "internalURL": "http://nova.mycloud.com:8776/v1/xpto",
                        "publicURL": "http://nova.mycloud.com:8776/v1/xpto"
                    }],
                    "type": "volume",
                    "name": "Volume Service"
                },
                {
                    "endpoints": [{
                        "adminURL": "http://nova.mycloud.com:8773/services/Admin",
                        "region": "RegionOne",
                        "internalURL": "http://nova.mycloud.com:8773/services/Cloud",
                        "publicURL": "http://nova.mycloud.com:8773/services/Cloud"
                    }],
                    "type": "ec2",
                    "name": "EC2 Service"
                },
                {
                    "endpoints": [{
                        "adminURL": "http://swift.mycloud.com:8080/",
                        "region": "RegionOne",
                        "internalURL": "http://swift.mycloud.com:8080/v1/AUTH_xpto",
                        "publicURL": "http://swift.mycloud.com:8080/v1/AUTH_xpto"
                    }],
                    "type": "object-store",
                    "name": "Swift Service"
                },
                {
                    "endpoints": [{
                        "adminURL": identity_admin_url,
                        "region": "RegionOne",
                        "internalURL": "http://keystone.mycloud.com:5000/v2.0",
                        "publicURL": "http://keystone.mycloud.com:5000/v2.0"
                    }],
                    "type": "identity",
                    "name": "Identity Service"
                }
            ],
            "user": {
                "username": "username",
                "roles_links": [],
                "id": "user-uuid",
                "roles": [{"name": "admin"}],
                "name": "username"
            }
        }
    })
}

/// Successful auth response without the catalog key
pub fn broken_auth_response() -> Value {
    json!({
        "access": {
            "token": {"expires": "2012-06-02T14:17:00Z", "id": "secret"},
            "user": {"id": "user-uuid", "name": "username"}
        }
    })
}

/// Mount a successful `POST /tokens` that wins over any catch-all mock
pub async fn mount_auth(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/tokens"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(auth_response("http://keystone.mycloud.com:35357/v2.0")),
        )
        .with_priority(1)
        .mount(server)
        .await;
}
